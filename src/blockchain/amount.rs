// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Decimal amount parsing and byte-to-hex encoding.

use std::fmt;

use super::error::{BlockchainError, BlockchainResult};

/// A signed integer amount of any size, kept in canonical decimal form.
///
/// Canonical means no leading zeros, no `+` sign, and zero is never
/// negative. `Display` yields exactly that text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    negative: bool,
    digits: String,
}

impl Amount {
    pub const fn zero() -> Self {
        Self {
            negative: false,
            digits: String::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.digits)
    }
}

/// Parse a base-10 integer amount.
///
/// Surrounding whitespace is trimmed and blank input is zero. Otherwise the
/// text must be an optional `+`/`-` followed by ASCII digits only. There is
/// no upper bound on magnitude.
pub fn parse_amount(text: &str) -> BlockchainResult<Amount> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Amount::zero());
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BlockchainError::InvalidAmount(format!(
            "{trimmed:?} is not a decimal integer"
        )));
    }

    let digits = digits.trim_start_matches('0');
    Ok(Amount {
        negative: negative && !digits.is_empty(),
        digits: digits.to_string(),
    })
}

/// `0x` followed by lowercase hex; empty input gives `"0x"`.
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    alloy::hex::encode_prefixed(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_zero() {
        assert_eq!(parse_amount("").unwrap(), Amount::zero());
        assert_eq!(parse_amount("   ").unwrap().to_string(), "0");
    }

    #[test]
    fn digits_round_trip_without_leading_zeros() {
        let cases = [
            ("0", "0"),
            ("000", "0"),
            ("7", "7"),
            ("000123", "123"),
            ("1000000000000000000", "1000000000000000000"),
            (
                "115792089237316195423570985008687907853269984665640564039457",
                "115792089237316195423570985008687907853269984665640564039457",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_amount(input).unwrap().to_string(), expected);
        }
    }

    #[test]
    fn magnitude_is_unbounded() {
        let huge = "9".repeat(90);
        assert_eq!(parse_amount(&huge).unwrap().to_string(), huge);

        let padded = format!("-000{}", "1".repeat(80));
        assert_eq!(
            parse_amount(&padded).unwrap().to_string(),
            format!("-{}", "1".repeat(80))
        );
    }

    #[test]
    fn sign_and_whitespace() {
        assert_eq!(parse_amount(" 42 ").unwrap().to_string(), "42");
        assert_eq!(parse_amount("+42").unwrap().to_string(), "42");
        assert_eq!(parse_amount("-42").unwrap().to_string(), "-42");
        assert!(parse_amount("-42").unwrap().is_negative());
    }

    #[test]
    fn negative_zero_is_zero() {
        let amount = parse_amount("-000").unwrap();
        assert!(amount.is_zero());
        assert!(!amount.is_negative());
        assert_eq!(amount.to_string(), "0");
    }

    #[test]
    fn rejects_non_integers() {
        for input in ["1.5", "abc", "0x10", "1e18", "1 000", "1_000", "-", "+", "--1", "+-1"] {
            assert!(
                matches!(parse_amount(input), Err(BlockchainError::InvalidAmount(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn hex_encoding() {
        assert_eq!(to_hex(Vec::<u8>::new()), "0x");
        assert_eq!(to_hex([0x01u8, 0x02, 0x03, 0xff]), "0x010203ff");
        assert_eq!(to_hex("ab".as_bytes()), "0x6162");
    }
}

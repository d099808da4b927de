// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Address normalization.
//!
//! Accepts `0x` followed by exactly 40 hex digits. Single-case input
//! (all lower or all upper) is taken as-is; mixed-case input must carry a
//! valid EIP-55 checksum.

use std::str::FromStr;

use alloy::primitives::Address;

use super::error::{BlockchainError, BlockchainResult};

const HEX_BODY_LEN: usize = 40;

/// Parse and validate an address string.
///
/// The returned [`Address`] displays in checksummed form.
pub fn normalize_address(address: &str) -> BlockchainResult<Address> {
    let body = address
        .strip_prefix("0x")
        .ok_or_else(|| BlockchainError::InvalidAddress(format!("{address}: missing 0x prefix")))?;

    if body.len() != HEX_BODY_LEN || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BlockchainError::InvalidAddress(format!(
            "{address}: expected 40 hex characters"
        )));
    }

    let parsed = Address::from_str(address)
        .map_err(|e| BlockchainError::InvalidAddress(format!("{address}: {e}")))?;

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && parsed.to_checksum(None) != address {
        return Err(BlockchainError::InvalidAddress(format!(
            "{address}: bad checksum"
        )));
    }

    Ok(parsed)
}

/// Checksummed canonical form of `address`.
pub fn to_checksum(address: &str) -> BlockchainResult<String> {
    normalize_address(address).map(|a| a.to_checksum(None))
}

/// Same rules as [`normalize_address`], as a boolean.
pub fn is_valid_address(address: &str) -> bool {
    normalize_address(address).is_ok()
}

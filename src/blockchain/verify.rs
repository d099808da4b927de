// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signature verification by signer recovery.

use alloy::primitives::Signature;

use super::signing::message_digest;

/// Check that `signature` over `message` was produced by `address`.
///
/// Uses the same digest and EIP-191 convention as
/// [`MessageSigner::sign`](super::MessageSigner::sign). Address comparison
/// is case-insensitive. Malformed signatures or addresses give `false`.
pub fn verify_signature(message: &str, signature: &str, address: &str) -> bool {
    let digest = message_digest(message);

    let sig_hex = signature.trim();
    let sig_hex = sig_hex.strip_prefix("0x").unwrap_or(sig_hex);
    let Ok(sig_bytes) = alloy::hex::decode(sig_hex) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(sig_bytes.as_slice()) else {
        return false;
    };

    match signature.recover_address_from_msg(digest.as_slice()) {
        Ok(recovered) => recovered.to_string().eq_ignore_ascii_case(address.trim()),
        Err(e) => {
            tracing::debug!(error = %e, "Signature recovery failed");
            false
        }
    }
}

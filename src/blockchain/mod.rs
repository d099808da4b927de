// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM-side primitives used by the signing endpoints.
//!
//! This module provides:
//! - Address normalization (EIP-55 checksum)
//! - Decimal amount parsing and hex encoding
//! - Registration / participation message signing with the owner key
//! - Signature verification by signer recovery

pub mod address;
pub mod amount;
pub mod error;
pub mod signing;
pub mod verify;

pub use address::{is_valid_address, normalize_address, to_checksum};
pub use amount::{parse_amount, to_hex, Amount};
pub use error::{BlockchainError, BlockchainResult};
pub use signing::{MessageSigner, SignedMessage};
pub use verify::verify_signature;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

/// Errors raised by the address/amount codecs and the message signer.
///
/// Verification never produces one of these; a failed check is `false`.
#[derive(Debug, thiserror::Error)]
pub enum BlockchainError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Failed to sign message: {0}")]
    SigningFailed(String),
}

pub type BlockchainResult<T> = Result<T, BlockchainError>;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Domain Response Codes
//!
//! A closed set of `(code, message)` pairs shared by every endpoint. The
//! codes are application codes, not HTTP semantics: `501` means "invalid
//! parameters" here, not "not implemented". The HTTP boundary in
//! [`crate::error`] renders a [`DomainException`] using the carried code
//! and message verbatim.

use serde::Serialize;

/// A stable `(code, message)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseCode {
    pub code: u16,
    pub message: &'static str,
}

impl ResponseCode {
    pub const SUCCESS: ResponseCode = ResponseCode::new(200, "Success");
    pub const NO_PERMISSION: ResponseCode = ResponseCode::new(403, "No Permission");
    pub const SERVER_ERROR: ResponseCode = ResponseCode::new(500, "Internal Server Error");
    pub const INVALID_PARAMETERS: ResponseCode = ResponseCode::new(501, "Invalid Parameters");
    pub const INVALID_TOKEN: ResponseCode = ResponseCode::new(502, "Invalid Token");
    pub const TOKEN_EXPIRED: ResponseCode = ResponseCode::new(502, "The token has expired");
    pub const FAILED: ResponseCode = ResponseCode::new(503, "Failed");
    pub const DATA_DUPLICATION: ResponseCode = ResponseCode::new(505, "Data exists");
    pub const VERIFICATION_FAILED: ResponseCode =
        ResponseCode::new(506, "Wrong account or password");
    pub const REQUEST_TOO_FREQUENT: ResponseCode =
        ResponseCode::new(509, "Requests are too frequent");
    pub const PRIVATE_KEY_EXISTS: ResponseCode = ResponseCode::new(502, "exist");
    pub const PRIVATE_KEY_NOT_EXISTS: ResponseCode = ResponseCode::new(503, "key not exist");

    const fn new(code: u16, message: &'static str) -> Self {
        Self { code, message }
    }
}

/// Kind of domain failure. Each kind maps to exactly one [`ResponseCode`].
///
/// Several kinds share a numeric code (`502`, `503`), so boundary code must
/// match on the kind rather than the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    InvalidParameters,
    ServerError,
    NoPermission,
    InvalidToken,
    TokenExpired,
    Failed,
    DataDuplication,
    VerificationFailed,
    RequestTooFrequent,
    PrivateKeyExists,
    PrivateKeyNotExists,
}

impl ExceptionKind {
    pub const ALL: [ExceptionKind; 11] = [
        ExceptionKind::InvalidParameters,
        ExceptionKind::ServerError,
        ExceptionKind::NoPermission,
        ExceptionKind::InvalidToken,
        ExceptionKind::TokenExpired,
        ExceptionKind::Failed,
        ExceptionKind::DataDuplication,
        ExceptionKind::VerificationFailed,
        ExceptionKind::RequestTooFrequent,
        ExceptionKind::PrivateKeyExists,
        ExceptionKind::PrivateKeyNotExists,
    ];

    pub const fn response_code(self) -> ResponseCode {
        match self {
            ExceptionKind::InvalidParameters => ResponseCode::INVALID_PARAMETERS,
            ExceptionKind::ServerError => ResponseCode::SERVER_ERROR,
            ExceptionKind::NoPermission => ResponseCode::NO_PERMISSION,
            ExceptionKind::InvalidToken => ResponseCode::INVALID_TOKEN,
            ExceptionKind::TokenExpired => ResponseCode::TOKEN_EXPIRED,
            ExceptionKind::Failed => ResponseCode::FAILED,
            ExceptionKind::DataDuplication => ResponseCode::DATA_DUPLICATION,
            ExceptionKind::VerificationFailed => ResponseCode::VERIFICATION_FAILED,
            ExceptionKind::RequestTooFrequent => ResponseCode::REQUEST_TOO_FREQUENT,
            ExceptionKind::PrivateKeyExists => ResponseCode::PRIVATE_KEY_EXISTS,
            ExceptionKind::PrivateKeyNotExists => ResponseCode::PRIVATE_KEY_NOT_EXISTS,
        }
    }
}

/// An application error carrying a domain code and a message.
///
/// When no message is given the kind's default message is used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DomainException {
    kind: ExceptionKind,
    message: String,
}

impl DomainException {
    pub fn new(kind: ExceptionKind, message: Option<&str>) -> Self {
        let message = message.unwrap_or(kind.response_code().message).to_string();
        Self { kind, message }
    }

    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    pub fn code(&self) -> u16 {
        self.kind.response_code().code
    }

    /// The carried message (override or default).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The default message of the code, ignoring any override.
    pub fn description(&self) -> &'static str {
        self.kind.response_code().message
    }

    pub fn invalid_parameters(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::InvalidParameters, message)
    }

    pub fn server_error(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::ServerError, message)
    }

    pub fn no_permission(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::NoPermission, message)
    }

    pub fn invalid_token(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::InvalidToken, message)
    }

    pub fn token_expired(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::TokenExpired, message)
    }

    pub fn failed(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::Failed, message)
    }

    pub fn data_duplication(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::DataDuplication, message)
    }

    pub fn verification_failed(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::VerificationFailed, message)
    }

    pub fn request_too_frequent(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::RequestTooFrequent, message)
    }

    pub fn private_key_exists(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::PrivateKeyExists, message)
    }

    pub fn private_key_not_exists(message: Option<&str>) -> Self {
        Self::new(ExceptionKind::PrivateKeyNotExists, message)
    }
}

impl From<ExceptionKind> for DomainException {
    fn from(kind: ExceptionKind) -> Self {
        Self::new(kind, None)
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::blockchain::BlockchainError;
use crate::exceptions::DomainException;
use crate::pagination::PaginationError;
use crate::storage::ProjectDbError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    /// Domain code, present for errors raised from the exception taxonomy.
    pub code: Option<u16>,
    pub message: String,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u16>,
    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
            detail: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 404 for a path no route matches.
    pub fn route_not_found(path: &str) -> Self {
        Self {
            detail: Some(format!("Route {path} not found")),
            ..Self::not_found("Not Found")
        }
    }

    /// Opaque 500. The cause is logged, never sent to the client.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    pub fn invalid_parameters(message: &str) -> Self {
        DomainException::invalid_parameters(Some(message)).into()
    }
}

impl From<DomainException> for ApiError {
    fn from(e: DomainException) -> Self {
        let status = StatusCode::from_u16(e.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            code: Some(e.code()),
            message: e.message().to_string(),
            detail: None,
        }
    }
}

impl From<BlockchainError> for ApiError {
    fn from(e: BlockchainError) -> Self {
        match e {
            BlockchainError::InvalidAddress(_) => Self::invalid_parameters("Invalid address"),
            BlockchainError::InvalidAmount(_) => Self::invalid_parameters("Invalid amount"),
            BlockchainError::InvalidPrivateKey(_) | BlockchainError::SigningFailed(_) => {
                Self::internal(e)
            }
        }
    }
}

impl From<PaginationError> for ApiError {
    fn from(e: PaginationError) -> Self {
        Self::invalid_parameters(&e.to_string())
    }
}

impl From<ProjectDbError> for ApiError {
    fn from(e: ProjectDbError) -> Self {
        Self::internal(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_parameters(&rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_parameters(&rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_parameters(&rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            code: self.code,
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: ApiError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body_bytes.to_vec()).unwrap())
    }

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");
        assert!(nf.code.is_none());

        let internal = ApiError::internal("disk on fire");
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message, "Internal server error");
    }

    #[tokio::test]
    async fn domain_exception_uses_code_as_status() {
        let (status, body) =
            body_of(DomainException::invalid_parameters(Some("Invalid user address")).into()).await;
        assert_eq!(status.as_u16(), 501);
        assert_eq!(body, r#"{"error":"Invalid user address","code":501}"#);

        let (status, body) = body_of(DomainException::request_too_frequent(None).into()).await;
        assert_eq!(status.as_u16(), 509);
        assert_eq!(body, r#"{"error":"Requests are too frequent","code":509}"#);
    }

    #[tokio::test]
    async fn route_not_found_body() {
        let (status, body) = body_of(ApiError::route_not_found("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Not Found","message":"Route /nope not found"}"#);
    }

    #[tokio::test]
    async fn internal_errors_are_opaque() {
        let (status, body) =
            body_of(BlockchainError::SigningFailed("secret detail".to_string()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn codec_errors_map_to_invalid_parameters() {
        let address: ApiError = BlockchainError::InvalidAddress("0x1".to_string()).into();
        assert_eq!(address.code, Some(501));
        assert_eq!(address.message, "Invalid address");

        let amount: ApiError = BlockchainError::InvalidAmount("1.5".to_string()).into();
        assert_eq!(amount.code, Some(501));
        assert_eq!(amount.message, "Invalid amount");

        let page: ApiError = PaginationError::InvalidPageParam {
            page_index: 0,
            page_size: 20,
        }
        .into();
        assert_eq!(page.code, Some(501));
    }
}

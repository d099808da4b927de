// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signing endpoints.
//!
//! The service key signs registration and participation payloads that the
//! sale contracts later check on-chain. Inputs are validated here so the
//! client gets a precise `InvalidParameters` message instead of a generic
//! codec error.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    blockchain::{is_valid_address, parse_amount, verify_signature},
    error::ApiError,
    models::{
        AddressResponse, ParticipationRequest, RegistrationRequest, SignatureResponse,
        VerifySignatureRequest, VerifySignatureResponse,
    },
    state::AppState,
};

/// Return the field if present, non-blank and a valid address.
fn require_address(value: Option<&str>, message: &str) -> Result<String, ApiError> {
    match value.map(str::trim) {
        Some(address) if is_valid_address(address) => Ok(address.to_string()),
        _ => Err(ApiError::invalid_parameters(message)),
    }
}

fn require_field(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn signature_response(state: &AppState, signature: String) -> Json<SignatureResponse> {
    Json(SignatureResponse {
        signature,
        signer_address: state.signer.address().to_checksum(None),
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/users/sign-registration",
    request_body = RegistrationRequest,
    tag = "Users",
    responses(
        (status = 200, body = SignatureResponse),
        (status = 501, description = "Invalid user or contract address")
    )
)]
pub async fn sign_registration(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<Json<SignatureResponse>, ApiError> {
    let Json(request) = payload?;

    let user = require_address(request.user_address.as_deref(), "Invalid user address")?;
    let contract = require_address(
        request.contract_address.as_deref(),
        "Invalid contract address",
    )?;

    let signature = state.signer.sign_registration(&user, &contract)?;
    tracing::info!(user = %user, contract = %contract, "Registration signed");

    Ok(signature_response(&state, signature))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/sign-participation",
    request_body = ParticipationRequest,
    tag = "Users",
    responses(
        (status = 200, body = SignatureResponse),
        (status = 501, description = "Invalid address or amount")
    )
)]
pub async fn sign_participation(
    State(state): State<AppState>,
    payload: Result<Json<ParticipationRequest>, JsonRejection>,
) -> Result<Json<SignatureResponse>, ApiError> {
    let Json(request) = payload?;

    let user = require_address(request.user_address.as_deref(), "Invalid user address")?;
    let contract = require_address(
        request.contract_address.as_deref(),
        "Invalid contract address",
    )?;

    let amount = require_field(&request.amount)
        .ok_or_else(|| ApiError::invalid_parameters("Invalid amount"))?;
    if parse_amount(amount).is_err() {
        return Err(ApiError::invalid_parameters("Invalid amount"));
    }

    let signature = state.signer.sign_participation(&user, amount, &contract)?;
    tracing::info!(user = %user, contract = %contract, "Participation signed");

    Ok(signature_response(&state, signature))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/verify-signature",
    request_body = VerifySignatureRequest,
    tag = "Users",
    responses(
        (status = 200, body = VerifySignatureResponse),
        (status = 501, description = "Missing required fields")
    )
)]
pub async fn verify(
    payload: Result<Json<VerifySignatureRequest>, JsonRejection>,
) -> Result<Json<VerifySignatureResponse>, ApiError> {
    let Json(request) = payload?;

    let (Some(message), Some(signature), Some(address)) = (
        require_field(&request.message),
        require_field(&request.signature),
        require_field(&request.address),
    ) else {
        return Err(ApiError::invalid_parameters("Missing required fields"));
    };

    Ok(Json(VerifySignatureResponse {
        valid: verify_signature(message, signature, address),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/address",
    tag = "Users",
    responses((status = 200, body = AddressResponse))
)]
pub async fn signer_address(State(state): State<AppState>) -> Json<AddressResponse> {
    Json(AddressResponse {
        address: state.signer.address().to_checksum(None),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::signing::{participation_message, registration_message};
    use crate::blockchain::signing::tests::TEST_KEY_ADDRESS;
    use crate::state::tests::test_state;

    const USER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const CONTRACT: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    fn registration(user: Option<&str>, contract: Option<&str>) -> RegistrationRequest {
        RegistrationRequest {
            user_address: user.map(String::from),
            contract_address: contract.map(String::from),
        }
    }

    fn participation(
        user: Option<&str>,
        amount: Option<&str>,
        contract: Option<&str>,
    ) -> ParticipationRequest {
        ParticipationRequest {
            user_address: user.map(String::from),
            amount: amount.map(String::from),
            contract_address: contract.map(String::from),
        }
    }

    #[tokio::test]
    async fn registration_signature_verifies() {
        let (state, _dir) = test_state();

        let Json(response) = sign_registration(
            State(state),
            Ok(Json(registration(Some(USER), Some(CONTRACT)))),
        )
        .await
        .expect("signing succeeds");

        assert_eq!(response.signer_address, TEST_KEY_ADDRESS);
        let payload = registration_message(USER, CONTRACT).unwrap();
        assert!(verify_signature(&payload, &response.signature, TEST_KEY_ADDRESS));
    }

    #[tokio::test]
    async fn registration_rejects_bad_addresses() {
        let (state, _dir) = test_state();
        let bad_checksum = "0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

        let cases = [
            (registration(None, Some(CONTRACT)), "Invalid user address"),
            (registration(Some("0x1234"), Some(CONTRACT)), "Invalid user address"),
            (registration(Some(bad_checksum), Some(CONTRACT)), "Invalid user address"),
            (registration(Some(USER), None), "Invalid contract address"),
            (registration(Some(USER), Some("")), "Invalid contract address"),
        ];

        for (request, expected) in cases {
            let err = sign_registration(State(state.clone()), Ok(Json(request)))
                .await
                .unwrap_err();
            assert_eq!(err.code, Some(501));
            assert_eq!(err.message, expected);
        }
    }

    #[tokio::test]
    async fn participation_signature_verifies() {
        let (state, _dir) = test_state();

        let Json(response) = sign_participation(
            State(state),
            Ok(Json(participation(Some(USER), Some("1000"), Some(CONTRACT)))),
        )
        .await
        .expect("signing succeeds");

        let payload = participation_message(USER, "1000", CONTRACT).unwrap();
        assert!(verify_signature(&payload, &response.signature, TEST_KEY_ADDRESS));
    }

    #[tokio::test]
    async fn participation_accepts_amounts_beyond_256_bits() {
        let (state, _dir) = test_state();
        let amount = "1".repeat(80);

        let Json(response) = sign_participation(
            State(state),
            Ok(Json(participation(Some(USER), Some(&amount), Some(CONTRACT)))),
        )
        .await
        .expect("signing succeeds");

        let payload = participation_message(USER, &amount, CONTRACT).unwrap();
        assert!(verify_signature(&payload, &response.signature, TEST_KEY_ADDRESS));
    }

    #[tokio::test]
    async fn participation_rejects_bad_amount() {
        let (state, _dir) = test_state();

        for amount in [None, Some(""), Some("1.5"), Some("abc")] {
            let err = sign_participation(
                State(state.clone()),
                Ok(Json(participation(Some(USER), amount, Some(CONTRACT)))),
            )
            .await
            .unwrap_err();
            assert_eq!(err.code, Some(501));
            assert_eq!(err.message, "Invalid amount");
        }
    }

    #[tokio::test]
    async fn verify_requires_all_fields() {
        let err = verify(Ok(Json(VerifySignatureRequest {
            message: Some("hello".to_string()),
            signature: None,
            address: Some(USER.to_string()),
        })))
        .await
        .unwrap_err();
        assert_eq!(err.code, Some(501));
        assert_eq!(err.message, "Missing required fields");
    }

    #[tokio::test]
    async fn verify_reports_false_for_garbage() {
        let Json(response) = verify(Ok(Json(VerifySignatureRequest {
            message: Some("hello".to_string()),
            signature: Some("0xdeadbeef".to_string()),
            address: Some(USER.to_string()),
        })))
        .await
        .unwrap();
        assert!(!response.valid);
    }

    #[tokio::test]
    async fn address_endpoint_returns_signer() {
        let (state, _dir) = test_state();
        let Json(response) = signer_address(State(state)).await;
        assert_eq!(response.address, TEST_KEY_ADDRESS);
    }
}

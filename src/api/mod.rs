// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{header, HeaderValue, Uri},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::ApiError,
    models::{
        AddressResponse, CreateProjectRequest, ParticipationRequest, Project,
        ProjectMutationResponse, RegistrationRequest, SignatureResponse, StatusResponse,
        UpdateProjectRequest, VerifySignatureRequest, VerifySignatureResponse,
    },
    state::AppState,
};

pub mod health;
pub mod middleware;
pub mod projects;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/status", get(health::status))
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/users/sign-registration", post(users::sign_registration))
        .route("/users/sign-participation", post(users::sign_participation))
        .route("/users/verify-signature", post(users::verify))
        .route("/users/address", get(users::signer_address))
        .layer(from_fn_with_state(state.clone(), middleware::rate_limit));

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/health/live", get(health::liveness));

    Router::new()
        .merge(health_routes)
        .nest("/api/v1", v1_routes)
        .fallback(route_not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive())
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_XSS_PROTECTION,
                    HeaderValue::from_static("1; mode=block"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::route_not_found(uri.path())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        health::status,
        projects::list_projects,
        projects::create_project,
        projects::get_project,
        projects::update_project,
        projects::delete_project,
        users::sign_registration,
        users::sign_participation,
        users::verify,
        users::signer_address
    ),
    components(
        schemas(
            Project,
            CreateProjectRequest,
            UpdateProjectRequest,
            ProjectMutationResponse,
            RegistrationRequest,
            ParticipationRequest,
            SignatureResponse,
            VerifySignatureRequest,
            VerifySignatureResponse,
            AddressResponse,
            StatusResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness, readiness and status"),
        (name = "Projects", description = "Token sale project records"),
        (name = "Users", description = "Registration and participation signatures")
    )
)]
struct ApiDoc;

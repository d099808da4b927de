// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{CreateProjectRequest, Project, ProjectMutationResponse, UpdateProjectRequest},
    pagination::{create_page, Page, PageParam, DEFAULT_PAGE_INDEX, DEFAULT_PAGE_SIZE},
    state::AppState,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default 1).
    pub page_index: Option<u32>,
    /// Items per page, 1 to 100 (default 20).
    pub page_size: Option<u32>,
}

impl PageQuery {
    fn into_page_param(self) -> Result<PageParam, ApiError> {
        Ok(PageParam::try_new(
            self.page_index.unwrap_or(DEFAULT_PAGE_INDEX),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )?)
    }
}

fn parse_project_id(raw: &str) -> Result<u64, ApiError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::invalid_parameters("Invalid project ID")),
    }
}

fn project_not_found() -> ApiError {
    ApiError::not_found("Project not found")
}

#[utoipa::path(
    get,
    path = "/api/v1/projects",
    params(PageQuery),
    tag = "Projects",
    responses(
        (status = 200, body = Page<Project>),
        (status = 501, description = "Invalid page parameters")
    )
)]
pub async fn list_projects(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<Project>>, ApiError> {
    let Query(query) = query?;
    let param = query.into_page_param()?;

    let (items, total) = state
        .projects
        .find_with_pagination(param.offset(), param.page_size)?;

    Ok(Json(create_page(&param, total, items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectRequest,
    tag = "Projects",
    responses(
        (status = 201, body = ProjectMutationResponse),
        (status = 501, description = "Malformed request body")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectMutationResponse>), ApiError> {
    let Json(request) = payload?;
    let project = state.projects.create(request)?;

    tracing::info!(project_id = project.id, "Project created");

    Ok((
        StatusCode::CREATED,
        Json(ProjectMutationResponse {
            message: "Project created successfully".to_string(),
            data: project,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = u64, Path, description = "Project identifier")
    ),
    tag = "Projects",
    responses(
        (status = 200, body = Project),
        (status = 404, description = "Project not found"),
        (status = 501, description = "Invalid project ID")
    )
)]
pub async fn get_project(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Project>, ApiError> {
    let id = parse_project_id(&id)?;
    state
        .projects
        .find_by_id(id)?
        .map(Json)
        .ok_or_else(project_not_found)
}

#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = u64, Path, description = "Project identifier")
    ),
    request_body = UpdateProjectRequest,
    tag = "Projects",
    responses(
        (status = 200, body = ProjectMutationResponse),
        (status = 404, description = "Project not found"),
        (status = 501, description = "Invalid project ID or body")
    )
)]
pub async fn update_project(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> Result<Json<ProjectMutationResponse>, ApiError> {
    let id = parse_project_id(&id)?;
    let Json(request) = payload?;

    let project = state
        .projects
        .update(id, request)?
        .ok_or_else(project_not_found)?;

    tracing::info!(project_id = id, "Project updated");

    Ok(Json(ProjectMutationResponse {
        message: "Project updated successfully".to_string(),
        data: project,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = u64, Path, description = "Project identifier")
    ),
    tag = "Projects",
    responses(
        (status = 204),
        (status = 404, description = "Project not found"),
        (status = 501, description = "Invalid project ID")
    )
)]
pub async fn delete_project(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let id = parse_project_id(&id)?;
    if !state.projects.delete(id)? {
        return Err(project_not_found());
    }

    tracing::info!(project_id = id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

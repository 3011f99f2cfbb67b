use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::AppState;
use crate::error::{ApiError, StatusError};
use crate::models::{NewProject, ProjectEnvelope, ProjectList, StatusReport, ALL_CATEGORIES};

const DATABASE_NAME: &str = "SQLite";
const STATUS_MESSAGE: &str = "API Wayne Industries operacional";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "all_categories")]
    pub tipo: String,
}

fn all_categories() -> String {
    ALL_CATEGORIES.to_string()
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub termo: String,
}

/// Counts every row, whatever its status; list and search only see active rows.
pub async fn status(State(state): State<AppState>) -> Result<Json<StatusReport>, StatusError> {
    let stats = state.db.category_stats().await?;
    let total = state.db.count_projects().await?;

    Ok(Json(StatusReport {
        status: StatusReport::ONLINE.to_string(),
        database: Some(DATABASE_NAME.to_string()),
        total_projects: Some(total),
        stats,
        message: Some(STATUS_MESSAGE.to_string()),
        error: None,
    }))
}

pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProjectList>, ApiError> {
    let projects = state.db.list_projects(&query.tipo).await?;
    Ok(Json(ProjectList::ok(projects)))
}

pub async fn search_projects(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ProjectList>, ApiError> {
    let projects = state.db.search_projects(&query.termo).await?;
    Ok(Json(ProjectList::ok(projects)))
}

pub async fn get_project(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProjectEnvelope>, ApiError> {
    // Non-numeric ids never match a route in the catalog.
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;

    let project = state.db.get_project(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(ProjectEnvelope::ok(project)))
}

pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectEnvelope>), ApiError> {
    let Json(new_project) = payload.map_err(|rej| ApiError::BadRequest(rej.body_text()))?;

    let project = state.db.create_project(&new_project).await?;
    tracing::info!(id = project.id, category = %project.category, "project created");

    Ok((StatusCode::CREATED, Json(ProjectEnvelope::ok(project))))
}

pub async fn not_found() -> ApiError {
    ApiError::UnknownRoute
}

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;

use super::json_body;
use crate::database::models::{Department, DepartmentInput};
use crate::database::DeleteResult;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RoleClaims};
use crate::state::AppState;

pub const LIST_ERROR: &str = "DPT500L";
pub const CREATE_ERROR: &str = "DPT500C";
pub const UPDATE_ERROR: &str = "DPT500U";
pub const DELETE_ERROR: &str = "DPT500D";

#[derive(Debug, Deserialize)]
pub struct DepartmentBody {
    pub department: DepartmentInput,
}

/// GET /departments/:id - departments of institution `:id`, no auth
pub async fn list_all(State(state): State<AppState>, Path(institution_id): Path<String>) -> ApiResult<Vec<Department>> {
    let departments = state
        .departments
        .list_all(&institution_id)
        .await
        .map_err(ApiError::with_code(LIST_ERROR))?;

    Ok(ApiResponse::ok("departments", departments))
}

/// POST /departments
pub async fn create(
    State(state): State<AppState>,
    claims: RoleClaims,
    body: Result<Json<DepartmentBody>, JsonRejection>,
) -> ApiResult<Department> {
    let body = json_body(CREATE_ERROR, body)?;
    let created = state
        .departments
        .create(claims.institution_id(), body.department)
        .await
        .map_err(ApiError::with_code(CREATE_ERROR))?;

    Ok(ApiResponse::created("createdDepartment", created))
}

/// PUT|PATCH /departments/:id
pub async fn update(
    State(state): State<AppState>,
    claims: RoleClaims,
    Path(id): Path<String>,
    body: Result<Json<DepartmentBody>, JsonRejection>,
) -> ApiResult<Department> {
    let body = json_body(UPDATE_ERROR, body)?;
    let updated = state
        .departments
        .update(claims.institution_id(), &id, body.department)
        .await
        .map_err(ApiError::with_code(UPDATE_ERROR))?;

    Ok(ApiResponse::ok("updatedDepartment", updated))
}

/// DELETE /departments/:id
pub async fn delete(
    State(state): State<AppState>,
    claims: RoleClaims,
    Path(id): Path<String>,
) -> ApiResult<DeleteResult> {
    let deleted = state
        .departments
        .delete(claims.institution_id(), &id)
        .await
        .map_err(ApiError::with_code(DELETE_ERROR))?;

    Ok(ApiResponse::gone("deleted", deleted))
}

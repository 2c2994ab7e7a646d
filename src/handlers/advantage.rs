use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;

use super::json_body;
use crate::database::models::{Advantage, AdvantageInput};
use crate::database::DeleteResult;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RoleClaims};
use crate::state::AppState;

pub const LIST_BY_BUSINESS_ERROR: &str = "ADV500LB";
pub const LIST_FOR_STUDENT_ERROR: &str = "ADV500LS";
pub const CREATE_ERROR: &str = "ADV500C";
pub const UPDATE_ERROR: &str = "ADV500U";
pub const DELETE_ERROR: &str = "ADV500D";

#[derive(Debug, Deserialize)]
pub struct AdvantageBody {
    pub advantage: AdvantageInput,
}

/// GET /advantages/business - advantages owned by the calling business
pub async fn list_owned_by_business(
    State(state): State<AppState>,
    claims: RoleClaims,
) -> ApiResult<Vec<Advantage>> {
    let advantages = state
        .advantages
        .list_all_owned_by_business(claims.business_id())
        .await
        .map_err(ApiError::with_code(LIST_BY_BUSINESS_ERROR))?;

    Ok(ApiResponse::ok("advantages", advantages))
}

/// GET /advantages - the whole catalog, for students
pub async fn list_all(State(state): State<AppState>, claims: RoleClaims) -> ApiResult<Vec<Advantage>> {
    let advantages = state
        .advantages
        .list_all(claims.student_id())
        .await
        .map_err(ApiError::with_code(LIST_FOR_STUDENT_ERROR))?;

    Ok(ApiResponse::ok("advantages", advantages))
}

/// POST /advantages
pub async fn create(
    State(state): State<AppState>,
    claims: RoleClaims,
    body: Result<Json<AdvantageBody>, JsonRejection>,
) -> ApiResult<Advantage> {
    let body = json_body(CREATE_ERROR, body)?;
    let created = state
        .advantages
        .create(claims.business_id(), body.advantage)
        .await
        .map_err(ApiError::with_code(CREATE_ERROR))?;

    Ok(ApiResponse::created("createdAdvantage", created))
}

/// PUT|PATCH /advantages/:id
pub async fn update(
    State(state): State<AppState>,
    claims: RoleClaims,
    Path(id): Path<String>,
    body: Result<Json<AdvantageBody>, JsonRejection>,
) -> ApiResult<Advantage> {
    let body = json_body(UPDATE_ERROR, body)?;
    let updated = state
        .advantages
        .update(claims.business_id(), &id, body.advantage)
        .await
        .map_err(ApiError::with_code(UPDATE_ERROR))?;

    Ok(ApiResponse::ok("updatedAdvantage", updated))
}

/// DELETE /advantages/:id - answers 410 Gone with the delete result
pub async fn delete(
    State(state): State<AppState>,
    claims: RoleClaims,
    Path(id): Path<String>,
) -> ApiResult<DeleteResult> {
    let deleted = state
        .advantages
        .delete(claims.business_id(), &id)
        .await
        .map_err(ApiError::with_code(DELETE_ERROR))?;

    Ok(ApiResponse::gone("deleted", deleted))
}

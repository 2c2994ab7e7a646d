use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::ApiError;

/// Success response whose payload is nested under a named key,
/// e.g. `{ "createdAdvantage": { ... } }`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub key: &'static str,
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a keyed response with default 200 status
    pub fn ok(key: &'static str, data: T) -> Self {
        Self::with_status(key, data, StatusCode::OK)
    }

    /// Create a keyed response with custom status code
    pub fn with_status(key: &'static str, data: T, status_code: StatusCode) -> Self {
        Self { key, data, status_code }
    }

    /// Create a 201 Created response
    pub fn created(key: &'static str, data: T) -> Self {
        Self::with_status(key, data, StatusCode::CREATED)
    }

    /// Create a 410 Gone response, used after deletions
    pub fn gone(key: &'static str, data: T) -> Self {
        Self::with_status(key, data, StatusCode::GONE)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "SERIALIZE500",
                        "message": "Failed to serialize response data"
                    })),
                )
                    .into_response();
            }
        };

        let mut envelope = Map::new();
        envelope.insert(self.key.to_string(), data_value);

        (self.status_code, Json(Value::Object(envelope))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

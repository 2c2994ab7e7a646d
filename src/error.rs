// HTTP API Error Types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::controllers::ControllerError;

/// Message used when an error carries no text of its own
pub const FALLBACK_MESSAGE: &str = "No message";

/// Failure categories, each mapped to one HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // 400 Bad Request
    Validation,

    // 401 Unauthorized
    Unauthorized,

    // 403 Forbidden
    Forbidden,

    // 404 Not Found
    NotFound,

    // 500 Internal Server Error
    Internal,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response carrying a fixed per-operation code such as `ADV500D`
#[derive(Debug, Clone)]
pub struct ApiError {
    code: &'static str,
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    pub fn new(code: &'static str, kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        };

        Self { code, kind, message }
    }

    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, ErrorKind::Validation, message)
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, ErrorKind::Unauthorized, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, ErrorKind::Internal, message)
    }

    /// Attach an operation code to a controller failure.
    /// Database errors are logged in full and surface a generic message.
    pub fn from_controller(code: &'static str, err: ControllerError) -> Self {
        let kind = err.kind();
        let message = match &err {
            ControllerError::Database(db_err) => {
                tracing::error!("{}: database error: {}", code, db_err);
                "Erro interno ao acessar os dados".to_string()
            }
            other => other.to_string(),
        };

        Self::new(code, kind, message)
    }

    /// `map_err` adapter: `.map_err(ApiError::with_code("ADV500C"))`
    pub fn with_code(code: &'static str) -> impl FnOnce(ControllerError) -> ApiError {
        move |err| ApiError::from_controller(code, err)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.code,
            "message": self.message,
        })
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status_code(), Json(self.to_json())).into_response();
        response.extensions_mut().insert(self.kind);
        response
    }
}

/// Response mapper that reports every API error as HTTP 500, keeping the
/// body untouched. Only responses produced by `ApiError` are rewritten.
pub async fn collapse_error_status(mut response: Response) -> Response {
    if response.extensions().get::<ErrorKind>().is_some() {
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseError;

    #[test]
    fn kinds_map_to_statuses() {
        assert_eq!(ErrorKind::Validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorKind::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn body_has_code_and_message() {
        let err = ApiError::from_controller(
            "ADV500D",
            ControllerError::Forbidden("A vantagem selecionado não pertence a essa empresa"),
        );
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            err.to_json(),
            json!({
                "error": "ADV500D",
                "message": "A vantagem selecionado não pertence a essa empresa"
            })
        );
    }

    #[test]
    fn empty_message_falls_back() {
        let err = ApiError::internal("DPT500C", "");
        assert_eq!(err.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn database_details_are_not_exposed() {
        let err = ApiError::from_controller(
            "DPT500L",
            ControllerError::Database(DatabaseError::QueryError("relation \"departments\" does not exist".into())),
        );
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(!err.message().contains("relation"));
    }

    #[tokio::test]
    async fn collapse_rewrites_only_api_errors() {
        let api = ApiError::unauthorized("ADV500C", "Você precisa ser uma empresa autenticada").into_response();
        assert_eq!(collapse_error_status(api).await.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let plain = StatusCode::NOT_FOUND.into_response();
        assert_eq!(collapse_error_status(plain).await.status(), StatusCode::NOT_FOUND);
    }
}

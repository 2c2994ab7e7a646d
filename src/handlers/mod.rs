// handlers/mod.rs - HTTP handlers
//
// Each handler pulls role claims, path and body out of the request, calls
// exactly one controller method, and wraps the outcome: a keyed JSON body on
// success, or `{ error, message }` under the operation's fixed code.
//
// public.rs     ← GET /, GET /health, GET /sign-in
// advantage.rs  ← /advantages[/:id]
// department.rs ← /departments[/:id]

pub mod advantage;
pub mod department;
pub mod public;

use axum::{extract::rejection::JsonRejection, Json};

use crate::error::ApiError;

/// Unwrap a JSON body, reporting extraction failures under the operation code
pub(crate) fn json_body<T>(code: &'static str, body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!("{}: rejected body: {}", code, rejection.body_text());
        ApiError::validation(code, rejection.body_text())
    })
}

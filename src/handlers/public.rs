use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::signin::SignInPage;
use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Advantage API",
        "version": version,
        "endpoints": {
            "advantages": "/advantages, /advantages/business, /advantages/:id",
            "departments": "/departments, /departments/:id",
            "sign_in": "/sign-in (public)",
            "health": "/health (public)",
        }
    }))
}

/// GET /health - liveness plus storage connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(database) = &state.database else {
        return (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "memory" })),
        );
    };

    match database.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

/// GET /sign-in - static content of the sign-in page
pub async fn sign_in() -> ApiResult<SignInPage> {
    Ok(ApiResponse::ok("signIn", SignInPage::default()))
}

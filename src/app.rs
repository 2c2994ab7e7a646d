use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::collapse_error_status;
use crate::handlers::{advantage, department, public};
use crate::middleware::role_claims_middleware;
use crate::state::AppState;

/// Build the full router with global middleware applied
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/sign-in", get(public::sign_in))
        .merge(advantage_routes())
        .merge(department_routes())
        .layer(middleware::from_fn_with_state(state.clone(), role_claims_middleware))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.api.collapse_error_status {
        router = router.layer(middleware::map_response(collapse_error_status));
    }

    if config.security.enable_cors {
        let origins: Vec<HeaderValue> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn advantage_routes() -> Router<AppState> {
    Router::new()
        .route("/advantages", get(advantage::list_all).post(advantage::create))
        .route("/advantages/business", get(advantage::list_owned_by_business))
        .route(
            "/advantages/:id",
            axum::routing::put(advantage::update)
                .patch(advantage::update)
                .delete(advantage::delete),
        )
}

fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/departments", axum::routing::post(department::create))
        // Listing takes the institution id; writes take the department id
        .route(
            "/departments/:id",
            get(department::list_all)
                .put(department::update)
                .patch(department::update)
                .delete(department::delete),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::{AppConfig, StorageBackend};
    use crate::database::MemoryStore;

    fn router(collapse_error_status: bool) -> Router {
        let mut config = AppConfig::development();
        config.database.backend = StorageBackend::Memory;
        config.api.enable_request_logging = false;
        config.api.collapse_error_status = collapse_error_status;
        app(AppState::in_memory(config, Arc::new(MemoryStore::new())))
    }

    fn patch_advantage() -> Request<Body> {
        Request::patch("/advantages/1")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"advantage":{"description":"Pizza","cost":10}}"#))
            .unwrap()
    }

    #[tokio::test]
    async fn patch_is_routed_like_put() {
        let response = router(false).oneshot(patch_advantage()).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn collapse_layer_only_rewrites_api_errors() {
        let response = router(true).oneshot(patch_advantage()).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let health = Request::get("/health").body(Body::empty()).unwrap();
        let response = router(true).oneshot(health).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let unknown = Request::get("/nowhere").body(Body::empty()).unwrap();
        let response = router(true).oneshot(unknown).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

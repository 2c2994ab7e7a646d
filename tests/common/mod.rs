#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};

use advantage_api::auth::{issue_token, Role};
use advantage_api::config::{AppConfig, SecurityConfig, StorageBackend};
use advantage_api::database::MemoryStore;
use advantage_api::{app, AppState};

pub const JWT_SECRET: &str = "integration-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub security: SecurityConfig,
}

impl TestServer {
    /// Bearer header value for the given role and id
    pub fn bearer(&self, role: Role, id: i64) -> String {
        let token = issue_token(role, id, &self.security).expect("token");
        format!("Bearer {}", token)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.backend = StorageBackend::Memory;
    config.api.enable_request_logging = false;
    config.security.enable_cors = false;
    config.security.jwt_secret = JWT_SECRET.to_string();
    config
}

/// Start the router in-process on a free port, backed by a fresh in-memory store
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(test_config()).await
}

pub async fn spawn_server_with(config: AppConfig) -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(MemoryStore::new());
    let security = config.security.clone();
    let state = AppState::in_memory(config, store.clone());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind {}", base_url))?;
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("server");
    });

    Ok(TestServer { port, base_url, store, security })
}

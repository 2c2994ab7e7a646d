use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use advantage_api::cli::{Cli, Commands};
use advantage_api::config::{self, AppConfig};
use advantage_api::database::DatabaseManager;
use advantage_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("advantage_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = config::config().clone();

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Migrate => migrate(&config).await,
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Advantage API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("SECURITY_JWT_SECRET must be set outside development");
    }

    let bind_addr = config.bind_addr();
    let state = AppState::from_config(config)
        .await
        .context("failed to initialize storage")?;
    let database = state.database.clone();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Advantage API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    Ok(())
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    let database = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    database.migrate().await.context("failed to apply migrations")?;
    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

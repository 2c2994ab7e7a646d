use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::controllers::{AdvantageController, DepartmentController};
use crate::database::{DatabaseError, DatabaseManager, MemoryStore, PgStore};

/// Shared by every request: configuration plus the controllers, each
/// holding its repositories.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub advantages: AdvantageController,
    pub departments: DepartmentController,
    /// Present when backed by PostgreSQL; used for health checks
    pub database: Option<DatabaseManager>,
}

impl AppState {
    /// Build the state for the configured storage backend, running
    /// migrations first when enabled.
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        match config.database.backend {
            StorageBackend::Postgres => {
                let database = DatabaseManager::connect(&config.database).await?;
                if config.database.run_migrations {
                    database.migrate().await?;
                }
                Ok(Self::postgres(config, database))
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage; data is lost on shutdown");
                Ok(Self::in_memory(config, Arc::new(MemoryStore::new())))
            }
        }
    }

    pub fn postgres(config: AppConfig, database: DatabaseManager) -> Self {
        let store = Arc::new(PgStore::new(database.pool().clone()));
        Self {
            config: Arc::new(config),
            advantages: AdvantageController::new(store.clone(), store.clone()),
            departments: DepartmentController::new(store),
            database: Some(database),
        }
    }

    pub fn in_memory(config: AppConfig, store: Arc<MemoryStore>) -> Self {
        Self {
            config: Arc::new(config),
            advantages: AdvantageController::new(store.clone(), store.clone()),
            departments: DepartmentController::new(store),
            database: None,
        }
    }
}

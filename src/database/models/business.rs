use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Partner business publishing advantages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

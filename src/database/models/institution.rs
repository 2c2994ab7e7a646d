use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Educational institution owning departments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Institution {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

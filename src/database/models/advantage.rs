use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A benefit or discount a business publishes for students
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Advantage {
    pub id: i64,
    pub business_id: i64,
    pub description: String,
    /// Price in student coins
    pub cost: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of an advantage, as sent under the `advantage` body key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvantageInput {
    pub description: String,
    pub cost: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl AdvantageInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("A descrição da vantagem é obrigatória".to_string());
        }
        if self.cost < 0 {
            return Err("O custo da vantagem não pode ser negativo".to_string());
        }
        Ok(())
    }
}

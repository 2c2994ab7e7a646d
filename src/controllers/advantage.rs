use std::sync::Arc;

use tracing::{info, warn};

use super::{parse_id, ControllerError};
use crate::database::models::{Advantage, AdvantageInput, Business};
use crate::database::{AdvantageRepository, BusinessRepository, DeleteResult};

pub const BUSINESS_REQUIRED: &str = "Você precisa ser uma empresa autenticada para realizar essa operação";
pub const STUDENT_REQUIRED: &str = "Você precisa ser um aluno autenticado para realizar essa operação";
pub const BUSINESS_NOT_FOUND: &str = "Empresa não encontrada";
pub const ADVANTAGE_NOT_FOUND: &str = "Vantagem não encontrada";
pub const UPDATE_ID_REQUIRED: &str = "Você precisa informar qual vantagem será atualizada";
pub const DELETE_ID_REQUIRED: &str = "Você precisa fornecer o ID da vantagem a ser removido";
pub const NOT_OWNED: &str = "A vantagem selecionado não pertence a essa empresa";
pub const UPDATE_FAILED: &str = "Ocorreu um erro ao atualizar a vantagem";
pub const DELETE_FAILED: &str = "Ocorreu um erro ao deletar a vantagem";

/// Advantage operations for businesses and students
#[derive(Clone)]
pub struct AdvantageController {
    advantages: Arc<dyn AdvantageRepository>,
    businesses: Arc<dyn BusinessRepository>,
}

impl AdvantageController {
    pub fn new(advantages: Arc<dyn AdvantageRepository>, businesses: Arc<dyn BusinessRepository>) -> Self {
        Self { advantages, businesses }
    }

    pub async fn list_all_owned_by_business(
        &self,
        business_id: Option<i64>,
    ) -> Result<Vec<Advantage>, ControllerError> {
        let business_id = business_id.ok_or(ControllerError::Unauthenticated(BUSINESS_REQUIRED))?;
        Ok(self.advantages.find_by_business(business_id).await?)
    }

    /// Every advantage in the catalog; any authenticated student may browse it
    pub async fn list_all(&self, student_id: Option<i64>) -> Result<Vec<Advantage>, ControllerError> {
        student_id.ok_or(ControllerError::Unauthenticated(STUDENT_REQUIRED))?;
        Ok(self.advantages.find_all().await?)
    }

    pub async fn create(
        &self,
        business_id: Option<i64>,
        input: AdvantageInput,
    ) -> Result<Advantage, ControllerError> {
        let business_id = business_id.ok_or(ControllerError::Unauthenticated(BUSINESS_REQUIRED))?;
        let business = self.require_business(business_id).await?;
        input.validate().map_err(ControllerError::Validation)?;

        let created = self.advantages.create(&business, input).await?;
        info!("Advantage {} created by business {}", created.id, business.id);
        Ok(created)
    }

    /// The write only matches rows owned by the caller, so a foreign
    /// advantage is reported as an ownership error and left untouched.
    pub async fn update(
        &self,
        business_id: Option<i64>,
        advantage_id: &str,
        input: AdvantageInput,
    ) -> Result<Advantage, ControllerError> {
        let advantage_id = parse_id(advantage_id, UPDATE_ID_REQUIRED)?;
        let business_id = business_id.ok_or(ControllerError::Unauthenticated(BUSINESS_REQUIRED))?;
        let business = self.require_business(business_id).await?;
        input.validate().map_err(ControllerError::Validation)?;

        match self.advantages.update_owned(advantage_id, business.id, input).await? {
            Some(updated) => {
                info!("Advantage {} updated by business {}", updated.id, business.id);
                Ok(updated)
            }
            None => {
                let missing = ControllerError::NotFound(ADVANTAGE_NOT_FOUND);
                Err(self.classify_miss(advantage_id, business.id, missing, UPDATE_FAILED).await?)
            }
        }
    }

    pub async fn delete(
        &self,
        business_id: Option<i64>,
        advantage_id: &str,
    ) -> Result<DeleteResult, ControllerError> {
        let advantage_id = parse_id(advantage_id, DELETE_ID_REQUIRED)?;
        let business_id = business_id.ok_or(ControllerError::Unauthenticated(BUSINESS_REQUIRED))?;

        let deleted = self.advantages.delete_owned(advantage_id, business_id).await?;
        if !deleted.is_effective() {
            // A missing advantage is reported as not belonging to the caller
            let missing = ControllerError::Forbidden(NOT_OWNED);
            return Err(self.classify_miss(advantage_id, business_id, missing, DELETE_FAILED).await?);
        }

        info!("Advantage {} deleted by business {}", advantage_id, business_id);
        Ok(deleted)
    }

    async fn require_business(&self, business_id: i64) -> Result<Business, ControllerError> {
        self.businesses
            .find_by_id(business_id)
            .await?
            .ok_or(ControllerError::NotFound(BUSINESS_NOT_FOUND))
    }

    /// Explain why an owner-guarded write matched nothing
    async fn classify_miss(
        &self,
        advantage_id: i64,
        business_id: i64,
        missing: ControllerError,
        failed: &'static str,
    ) -> Result<ControllerError, ControllerError> {
        Ok(match self.advantages.find_by_id(advantage_id).await? {
            None => missing,
            Some(advantage) if advantage.business_id != business_id => {
                warn!(
                    "Business {} tried to modify advantage {} owned by business {}",
                    business_id, advantage_id, advantage.business_id
                );
                ControllerError::Forbidden(NOT_OWNED)
            }
            Some(_) => ControllerError::Failed(failed),
        })
    }
}

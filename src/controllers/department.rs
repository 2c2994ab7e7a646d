use std::sync::Arc;

use tracing::{info, warn};

use super::{parse_id, ControllerError};
use crate::database::models::{Department, DepartmentInput, Institution};
use crate::database::{DeleteResult, InstitutionRepository};

pub const INSTITUTION_REQUIRED: &str = "Você precisa ser uma instituição autenticada para realizar essa operação";
pub const INSTITUTION_NOT_FOUND: &str = "Instituição não encontrada";
pub const INSTITUTION_ID_INVALID: &str = "Você precisa informar o ID numérico da instituição";
pub const DEPARTMENT_NOT_FOUND: &str = "Departamento não encontrado";
pub const UPDATE_ID_REQUIRED: &str = "Você precisa informar qual departamento será atualizado";
pub const DELETE_ID_REQUIRED: &str = "Você precisa fornecer o ID do departamento a ser removido";
pub const NOT_OWNED: &str = "O departamento selecionado não pertence a essa instituição";
pub const UPDATE_FAILED: &str = "Ocorreu um erro ao atualizar o departamento";
pub const DELETE_FAILED: &str = "Ocorreu um erro ao deletar o departamento";

/// Department operations for institutions
#[derive(Clone)]
pub struct DepartmentController {
    institutions: Arc<dyn InstitutionRepository>,
}

impl DepartmentController {
    pub fn new(institutions: Arc<dyn InstitutionRepository>) -> Self {
        Self { institutions }
    }

    /// Departments of the institution named in the path.
    ///
    /// The caller is not authenticated here, unlike the advantage listings.
    /// Any client can read any institution's departments.
    pub async fn list_all(&self, institution_id: &str) -> Result<Vec<Department>, ControllerError> {
        let institution_id = parse_id(institution_id, INSTITUTION_ID_INVALID)?;
        Ok(self.institutions.departments_by_institution(institution_id).await?)
    }

    pub async fn create(
        &self,
        institution_id: Option<i64>,
        input: DepartmentInput,
    ) -> Result<Department, ControllerError> {
        let institution_id = institution_id.ok_or(ControllerError::Unauthenticated(INSTITUTION_REQUIRED))?;
        let institution = self.require_institution(institution_id).await?;
        input.validate().map_err(ControllerError::Validation)?;

        let created = self.institutions.add_department(&institution, input).await?;
        info!("Department {} created by institution {}", created.id, institution.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        institution_id: Option<i64>,
        department_id: &str,
        input: DepartmentInput,
    ) -> Result<Department, ControllerError> {
        let department_id = parse_id(department_id, UPDATE_ID_REQUIRED)?;
        let institution_id = institution_id.ok_or(ControllerError::Unauthenticated(INSTITUTION_REQUIRED))?;
        let institution = self.require_institution(institution_id).await?;
        input.validate().map_err(ControllerError::Validation)?;

        match self
            .institutions
            .update_department_owned(department_id, institution.id, input)
            .await?
        {
            Some(updated) => {
                info!("Department {} updated by institution {}", updated.id, institution.id);
                Ok(updated)
            }
            None => {
                let missing = ControllerError::NotFound(DEPARTMENT_NOT_FOUND);
                Err(self.classify_miss(department_id, institution.id, missing, UPDATE_FAILED).await?)
            }
        }
    }

    pub async fn delete(
        &self,
        institution_id: Option<i64>,
        department_id: &str,
    ) -> Result<DeleteResult, ControllerError> {
        let department_id = parse_id(department_id, DELETE_ID_REQUIRED)?;
        let institution_id = institution_id.ok_or(ControllerError::Unauthenticated(INSTITUTION_REQUIRED))?;

        let deleted = self
            .institutions
            .delete_department_owned(department_id, institution_id)
            .await?;
        if !deleted.is_effective() {
            // A missing department is reported as not belonging to the caller
            let missing = ControllerError::Forbidden(NOT_OWNED);
            return Err(self.classify_miss(department_id, institution_id, missing, DELETE_FAILED).await?);
        }

        info!("Department {} deleted by institution {}", department_id, institution_id);
        Ok(deleted)
    }

    async fn require_institution(&self, institution_id: i64) -> Result<Institution, ControllerError> {
        self.institutions
            .find_by_id(institution_id)
            .await?
            .ok_or(ControllerError::NotFound(INSTITUTION_NOT_FOUND))
    }

    async fn classify_miss(
        &self,
        department_id: i64,
        institution_id: i64,
        missing: ControllerError,
        failed: &'static str,
    ) -> Result<ControllerError, ControllerError> {
        Ok(match self.institutions.department_by_id(department_id).await? {
            None => missing,
            Some(department) if department.institution_id != institution_id => {
                warn!(
                    "Institution {} tried to modify department {} owned by institution {}",
                    institution_id, department_id, department.institution_id
                );
                ControllerError::Forbidden(NOT_OWNED)
            }
            Some(_) => ControllerError::Failed(failed),
        })
    }
}

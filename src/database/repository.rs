use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Advantage, AdvantageInput, Business, Department, DepartmentInput, Institution,
};

/// Outcome of a delete, returned to the caller under the `deleted` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub affected: u64,
}

impl DeleteResult {
    pub fn is_effective(&self) -> bool {
        self.affected > 0
    }
}

#[async_trait]
pub trait AdvantageRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Advantage>, DatabaseError>;

    async fn find_by_business(&self, business_id: i64) -> Result<Vec<Advantage>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Advantage>, DatabaseError>;

    async fn create(&self, business: &Business, input: AdvantageInput) -> Result<Advantage, DatabaseError>;

    /// Updates the advantage only when it belongs to `business_id`.
    /// `None` means no row matched both conditions.
    async fn update_owned(
        &self,
        id: i64,
        business_id: i64,
        input: AdvantageInput,
    ) -> Result<Option<Advantage>, DatabaseError>;

    /// Deletes the advantage only when it belongs to `business_id`.
    async fn delete_owned(&self, id: i64, business_id: i64) -> Result<DeleteResult, DatabaseError>;
}

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Business>, DatabaseError>;
}

/// Institutions and the departments they own
#[async_trait]
pub trait InstitutionRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Institution>, DatabaseError>;

    async fn departments_by_institution(&self, institution_id: i64) -> Result<Vec<Department>, DatabaseError>;

    async fn department_by_id(&self, id: i64) -> Result<Option<Department>, DatabaseError>;

    async fn add_department(
        &self,
        institution: &Institution,
        input: DepartmentInput,
    ) -> Result<Department, DatabaseError>;

    async fn update_department_owned(
        &self,
        id: i64,
        institution_id: i64,
        input: DepartmentInput,
    ) -> Result<Option<Department>, DatabaseError>;

    async fn delete_department_owned(
        &self,
        id: i64,
        institution_id: i64,
    ) -> Result<DeleteResult, DatabaseError>;
}

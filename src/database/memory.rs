use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Advantage, AdvantageInput, Business, Department, DepartmentInput, Institution,
};
use crate::database::repository::{
    AdvantageRepository, BusinessRepository, DeleteResult, InstitutionRepository,
};

#[derive(Default)]
struct Tables {
    businesses: BTreeMap<i64, Business>,
    institutions: BTreeMap<i64, Institution>,
    advantages: BTreeMap<i64, Advantage>,
    departments: BTreeMap<i64, Department>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process repositories for local runs and tests. Each write takes the
/// table lock once, so owner checks and mutations are atomic here too.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_business(&self, name: &str) -> Business {
        let mut tables = self.tables.write().await;
        let business = Business {
            id: tables.next_id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        tables.businesses.insert(business.id, business.clone());
        business
    }

    pub async fn seed_institution(&self, name: &str) -> Institution {
        let mut tables = self.tables.write().await;
        let institution = Institution {
            id: tables.next_id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        tables.institutions.insert(institution.id, institution.clone());
        institution
    }

    pub async fn advantage_count(&self) -> usize {
        self.tables.read().await.advantages.len()
    }

    pub async fn department_count(&self) -> usize {
        self.tables.read().await.departments.len()
    }
}

#[async_trait]
impl AdvantageRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Advantage>, DatabaseError> {
        Ok(self.tables.read().await.advantages.values().cloned().collect())
    }

    async fn find_by_business(&self, business_id: i64) -> Result<Vec<Advantage>, DatabaseError> {
        Ok(self
            .tables
            .read()
            .await
            .advantages
            .values()
            .filter(|a| a.business_id == business_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Advantage>, DatabaseError> {
        Ok(self.tables.read().await.advantages.get(&id).cloned())
    }

    async fn create(&self, business: &Business, input: AdvantageInput) -> Result<Advantage, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.businesses.contains_key(&business.id) {
            return Err(DatabaseError::QueryError(format!(
                "business {} does not exist",
                business.id
            )));
        }

        let now = Utc::now();
        let advantage = Advantage {
            id: tables.next_id(),
            business_id: business.id,
            description: input.description,
            cost: input.cost,
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        };
        tables.advantages.insert(advantage.id, advantage.clone());
        Ok(advantage)
    }

    async fn update_owned(
        &self,
        id: i64,
        business_id: i64,
        input: AdvantageInput,
    ) -> Result<Option<Advantage>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(advantage) = tables
            .advantages
            .get_mut(&id)
            .filter(|a| a.business_id == business_id)
        else {
            return Ok(None);
        };

        advantage.description = input.description;
        advantage.cost = input.cost;
        advantage.image_url = input.image_url;
        advantage.updated_at = Utc::now();
        Ok(Some(advantage.clone()))
    }

    async fn delete_owned(&self, id: i64, business_id: i64) -> Result<DeleteResult, DatabaseError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .advantages
            .get(&id)
            .is_some_and(|a| a.business_id == business_id);
        if owned {
            tables.advantages.remove(&id);
        }
        Ok(DeleteResult {
            affected: u64::from(owned),
        })
    }
}

#[async_trait]
impl BusinessRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Business>, DatabaseError> {
        Ok(self.tables.read().await.businesses.get(&id).cloned())
    }
}

#[async_trait]
impl InstitutionRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Institution>, DatabaseError> {
        Ok(self.tables.read().await.institutions.get(&id).cloned())
    }

    async fn departments_by_institution(&self, institution_id: i64) -> Result<Vec<Department>, DatabaseError> {
        Ok(self
            .tables
            .read()
            .await
            .departments
            .values()
            .filter(|d| d.institution_id == institution_id)
            .cloned()
            .collect())
    }

    async fn department_by_id(&self, id: i64) -> Result<Option<Department>, DatabaseError> {
        Ok(self.tables.read().await.departments.get(&id).cloned())
    }

    async fn add_department(
        &self,
        institution: &Institution,
        input: DepartmentInput,
    ) -> Result<Department, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.institutions.contains_key(&institution.id) {
            return Err(DatabaseError::QueryError(format!(
                "institution {} does not exist",
                institution.id
            )));
        }

        let now = Utc::now();
        let department = Department {
            id: tables.next_id(),
            institution_id: institution.id,
            name: input.name,
            created_at: now,
            updated_at: now,
        };
        tables.departments.insert(department.id, department.clone());
        Ok(department)
    }

    async fn update_department_owned(
        &self,
        id: i64,
        institution_id: i64,
        input: DepartmentInput,
    ) -> Result<Option<Department>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(department) = tables
            .departments
            .get_mut(&id)
            .filter(|d| d.institution_id == institution_id)
        else {
            return Ok(None);
        };

        department.name = input.name;
        department.updated_at = Utc::now();
        Ok(Some(department.clone()))
    }

    async fn delete_department_owned(
        &self,
        id: i64,
        institution_id: i64,
    ) -> Result<DeleteResult, DatabaseError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .departments
            .get(&id)
            .is_some_and(|d| d.institution_id == institution_id);
        if owned {
            tables.departments.remove(&id);
        }
        Ok(DeleteResult {
            affected: u64::from(owned),
        })
    }
}

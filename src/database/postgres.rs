use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Advantage, AdvantageInput, Business, Department, DepartmentInput, Institution,
};
use crate::database::repository::{
    AdvantageRepository, BusinessRepository, DeleteResult, InstitutionRepository,
};

const ADVANTAGE_COLUMNS: &str = "id, business_id, description, cost, image_url, created_at, updated_at";
const DEPARTMENT_COLUMNS: &str = "id, institution_id, name, created_at, updated_at";

/// Repositories backed by PostgreSQL. Ownership-guarded writes are single
/// statements so the owner check and the write cannot interleave with
/// another request.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdvantageRepository for PgStore {
    async fn find_all(&self) -> Result<Vec<Advantage>, DatabaseError> {
        let sql = format!("SELECT {ADVANTAGE_COLUMNS} FROM advantages ORDER BY id");
        Ok(sqlx::query_as::<_, Advantage>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_business(&self, business_id: i64) -> Result<Vec<Advantage>, DatabaseError> {
        let sql = format!("SELECT {ADVANTAGE_COLUMNS} FROM advantages WHERE business_id = $1 ORDER BY id");
        Ok(sqlx::query_as::<_, Advantage>(&sql)
            .bind(business_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Advantage>, DatabaseError> {
        let sql = format!("SELECT {ADVANTAGE_COLUMNS} FROM advantages WHERE id = $1");
        Ok(sqlx::query_as::<_, Advantage>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create(&self, business: &Business, input: AdvantageInput) -> Result<Advantage, DatabaseError> {
        let sql = format!(
            "INSERT INTO advantages (business_id, description, cost, image_url) \
             VALUES ($1, $2, $3, $4) RETURNING {ADVANTAGE_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Advantage>(&sql)
            .bind(business.id)
            .bind(input.description)
            .bind(input.cost)
            .bind(input.image_url)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_owned(
        &self,
        id: i64,
        business_id: i64,
        input: AdvantageInput,
    ) -> Result<Option<Advantage>, DatabaseError> {
        let sql = format!(
            "UPDATE advantages SET description = $3, cost = $4, image_url = $5, updated_at = now() \
             WHERE id = $1 AND business_id = $2 RETURNING {ADVANTAGE_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Advantage>(&sql)
            .bind(id)
            .bind(business_id)
            .bind(input.description)
            .bind(input.cost)
            .bind(input.image_url)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_owned(&self, id: i64, business_id: i64) -> Result<DeleteResult, DatabaseError> {
        let result = sqlx::query("DELETE FROM advantages WHERE id = $1 AND business_id = $2")
            .bind(id)
            .bind(business_id)
            .execute(&self.pool)
            .await?;
        Ok(DeleteResult {
            affected: result.rows_affected(),
        })
    }
}

#[async_trait]
impl BusinessRepository for PgStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Business>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, Business>("SELECT id, name, created_at FROM businesses WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl InstitutionRepository for PgStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Institution>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, Institution>("SELECT id, name, created_at FROM institutions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn departments_by_institution(&self, institution_id: i64) -> Result<Vec<Department>, DatabaseError> {
        let sql = format!("SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE institution_id = $1 ORDER BY id");
        Ok(sqlx::query_as::<_, Department>(&sql)
            .bind(institution_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn department_by_id(&self, id: i64) -> Result<Option<Department>, DatabaseError> {
        let sql = format!("SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = $1");
        Ok(sqlx::query_as::<_, Department>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn add_department(
        &self,
        institution: &Institution,
        input: DepartmentInput,
    ) -> Result<Department, DatabaseError> {
        let sql = format!(
            "INSERT INTO departments (institution_id, name) VALUES ($1, $2) RETURNING {DEPARTMENT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Department>(&sql)
            .bind(institution.id)
            .bind(input.name)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_department_owned(
        &self,
        id: i64,
        institution_id: i64,
        input: DepartmentInput,
    ) -> Result<Option<Department>, DatabaseError> {
        let sql = format!(
            "UPDATE departments SET name = $3, updated_at = now() \
             WHERE id = $1 AND institution_id = $2 RETURNING {DEPARTMENT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Department>(&sql)
            .bind(id)
            .bind(institution_id)
            .bind(input.name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_department_owned(
        &self,
        id: i64,
        institution_id: i64,
    ) -> Result<DeleteResult, DatabaseError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1 AND institution_id = $2")
            .bind(id)
            .bind(institution_id)
            .execute(&self.pool)
            .await?;
        Ok(DeleteResult {
            affected: result.rows_affected(),
        })
    }
}

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    entities::employment::{Employment, EmploymentRecord, NewEmployment},
    errors::AppError,
    repositories::sqlx_repo::SqlxEmploymentRepo,
};

#[async_trait]
pub trait EmploymentRepository: Send + Sync {
    /// Pings the backing store
    async fn check_connection(&self) -> Result<(), AppError>;

    /// Whether a user with this id exists
    async fn user_exists(&self, user_id: i32) -> Result<bool, AppError>;

    /// Stores the employment for the user and returns it with its id and tenure filled in
    async fn create_employment(
        &self,
        user_id: i32,
        employment: &NewEmployment,
    ) -> Result<Employment, AppError>;
}

impl SqlxEmploymentRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxEmploymentRepo { pool }
    }
}

#[async_trait]
impl EmploymentRepository for SqlxEmploymentRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn user_exists(&self, user_id: i32) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)"
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(exists)
    }

    async fn create_employment(
        &self,
        user_id: i32,
        employment: &NewEmployment,
    ) -> Result<Employment, AppError> {
        let record = sqlx::query_as::<_, EmploymentRecord>(
            r#"
            INSERT INTO employments (user_id, company, salary, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, company, salary, start_date, end_date, created_at, updated_at
            "#
        )
        .bind(user_id)
        .bind(&employment.company)
        .bind(employment.salary)
        .bind(employment.start_date)
        .bind(employment.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("User does not exist".into()),
            other => other,
        })?;

        Ok(Employment::from_record(record, Utc::now().date_naive()))
    }
}

use validator::Validate;

use crate::{
    entities::employment::{ordered_field_errors, CreateUserEmploymentRequest, CreateUserEmploymentResponse},
    errors::AppError,
    repositories::employment::EmploymentRepository,
};

pub struct EmploymentHandler<R>
where
    R: EmploymentRepository,
{
    pub employment_repo: R,
}

impl<R> EmploymentHandler<R>
where
    R: EmploymentRepository,
{
    pub fn new(employment_repo: R) -> Self {
        EmploymentHandler { employment_repo }
    }

    /// Validates the request, stores the employment for its user and returns the stored record
    pub async fn create_user_employment(
        &self,
        request: CreateUserEmploymentRequest,
    ) -> Result<CreateUserEmploymentResponse, AppError> {
        request.validate().map_err(|errors| {
            let failures = ordered_field_errors(&errors);
            tracing::warn!(count = failures.len(), "Rejected employment request");
            AppError::ValidationError(failures)
        })?;

        let user_id = request
            .user_id
            .ok_or_else(|| AppError::InternalError("validated request lost its user id".into()))?;

        if !self.employment_repo.user_exists(user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let new_employment = request.prepare_for_insert();

        let employment = self.employment_repo
            .create_employment(user_id, &new_employment)
            .await?;

        tracing::info!(
            employment_id = employment.id,
            user_id,
            "Created employment record"
        );

        Ok(employment.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::employment::{Employment, NewEmployment, COMPANY_REQUIRED};
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use mockall::{mock, predicate::eq};
    use rust_decimal::Decimal;

    mock! {
        pub EmploymentRepo {}

        #[async_trait]
        impl EmploymentRepository for EmploymentRepo {
            async fn check_connection(&self) -> Result<(), AppError>;
            async fn user_exists(&self, user_id: i32) -> Result<bool, AppError>;
            async fn create_employment(
                &self,
                user_id: i32,
                employment: &NewEmployment,
            ) -> Result<Employment, AppError>;
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_request() -> CreateUserEmploymentRequest {
        CreateUserEmploymentRequest {
            user_id: Some(1),
            company: "Acme".to_string(),
            salary: Some(Decimal::new(50000, 0)),
            start_date: Some(date(2020, 1, 1)),
            end_date: Some(date(2020, 4, 1)),
        }
    }

    fn persisted(user_id: i32, new: &NewEmployment) -> Employment {
        let now = Utc::now();
        Employment {
            id: 7,
            user_id,
            company: new.company.clone(),
            salary: new.salary,
            months_of_experience: 3,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn creates_employment_for_existing_user() {
        let mut repo = MockEmploymentRepo::new();
        repo.expect_user_exists()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_create_employment()
            .withf(|user_id, new| *user_id == 1 && new.company == "Acme")
            .times(1)
            .returning(|user_id, new| Ok(persisted(user_id, new)));

        let handler = EmploymentHandler::new(repo);
        let response = handler.create_user_employment(valid_request()).await.unwrap();

        assert_eq!(response.id, 7);
        assert_eq!(response.months_of_experience, 3);
        assert_eq!(response.company, "Acme");
        assert_eq!(response.salary, Decimal::new(50000, 0));
        assert_eq!(response.start_date, date(2020, 1, 1));
        assert_eq!(response.end_date, Some(date(2020, 4, 1)));
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_repository() {
        let repo = MockEmploymentRepo::new();
        let handler = EmploymentHandler::new(repo);

        let request = CreateUserEmploymentRequest { company: String::new(), ..valid_request() };

        match handler.create_user_employment(request).await {
            Err(AppError::ValidationError(failures)) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].field, "company");
                assert_eq!(failures[0].message, COMPANY_REQUIRED);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn validation_failures_keep_rule_order() {
        let handler = EmploymentHandler::new(MockEmploymentRepo::new());

        let request = CreateUserEmploymentRequest {
            user_id: None,
            company: String::new(),
            salary: Some(Decimal::new(-5, 0)),
            start_date: Some(date(2020, 1, 1)),
            end_date: Some(date(2019, 1, 1)),
        };

        match handler.create_user_employment(request).await {
            Err(AppError::ValidationError(failures)) => {
                let fields: Vec<&str> = failures.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(fields, vec!["user_id", "company", "salary", "end_date"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let mut repo = MockEmploymentRepo::new();
        repo.expect_user_exists().returning(|_| Ok(false));
        repo.expect_create_employment().never();

        let handler = EmploymentHandler::new(repo);
        let result = handler.create_user_employment(valid_request()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn repository_errors_propagate() {
        let mut repo = MockEmploymentRepo::new();
        repo.expect_user_exists().returning(|_| Ok(true));
        repo.expect_create_employment()
            .returning(|_, _| Err(AppError::InternalError("connection reset".into())));

        let handler = EmploymentHandler::new(repo);
        let result = handler.create_user_employment(valid_request()).await;

        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}

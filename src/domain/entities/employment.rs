use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::FieldError;

pub const USER_ID_REQUIRED: &str = "User ID is required.";
pub const COMPANY_REQUIRED: &str = "Company name is required.";
pub const SALARY_REQUIRED: &str = "Salary is required.";
pub const SALARY_NOT_NEGATIVE: &str = "Salary must be greater than or equal to 0.";
pub const START_DATE_REQUIRED: &str = "Start date is required.";
pub const END_DATE_NOT_BEFORE_START: &str = "End date must be greater than or equal to start date.";

// ───── Database Models ───────────────────────────────────────────────

/// Row shape of the `employments` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmploymentRecord {
    pub id: i32,
    pub user_id: i32,
    pub company: String,
    pub salary: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted employment with its derived tenure.
#[derive(Debug, Clone, PartialEq)]
pub struct Employment {
    pub id: i32,
    pub user_id: i32,
    pub company: String,
    pub salary: Decimal,
    pub months_of_experience: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employment {
    /// Builds the entity from a stored row, counting ongoing employments up to `today`.
    pub fn from_record(record: EmploymentRecord, today: NaiveDate) -> Self {
        let months_of_experience = months_of_experience(record.start_date, record.end_date, today);

        Self {
            id: record.id,
            user_id: record.user_id,
            company: record.company,
            salary: record.salary,
            months_of_experience,
            start_date: record.start_date,
            end_date: record.end_date,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Employment fields ready to be stored. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployment {
    pub company: String,
    pub salary: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Whole calendar months between `start_date` and `end_date`, or `today` when
/// the employment is still ongoing. A month only counts once its day is reached.
pub fn months_of_experience(start_date: NaiveDate, end_date: Option<NaiveDate>, today: NaiveDate) -> i32 {
    let until = end_date.unwrap_or(today);
    if until <= start_date {
        return 0;
    }

    let mut months = (until.year() - start_date.year()) * 12
        + until.month() as i32
        - start_date.month() as i32;

    if until.day() < start_date.day() {
        months -= 1;
    }

    months.max(0)
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserEmploymentResponse {
    pub id: i32,
    pub company: String,
    pub salary: Decimal,
    pub months_of_experience: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl From<Employment> for CreateUserEmploymentResponse {
    fn from(employment: Employment) -> Self {
        Self {
            id: employment.id,
            company: employment.company,
            salary: employment.salary,
            months_of_experience: employment.months_of_experience,
            start_date: employment.start_date,
            end_date: employment.end_date,
        }
    }
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserEmploymentRequest {
    #[serde(default)]
    pub user_id: Option<i32>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,

    #[serde(default)]
    pub salary: Option<Decimal>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Reads a JSON `null` the same as a missing key, so the company rule reports it.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

struct Rule {
    field: &'static str,
    code: &'static str,
    message: &'static str,
    passes: fn(&CreateUserEmploymentRequest) -> bool,
}

// Evaluated independently, reported in this order.
const RULES: &[Rule] = &[
    Rule { field: "user_id", code: "required", message: USER_ID_REQUIRED, passes: has_user_id },
    Rule { field: "company", code: "required", message: COMPANY_REQUIRED, passes: has_company },
    Rule { field: "salary", code: "required", message: SALARY_REQUIRED, passes: has_salary },
    Rule { field: "salary", code: "range", message: SALARY_NOT_NEGATIVE, passes: salary_not_negative },
    Rule { field: "start_date", code: "required", message: START_DATE_REQUIRED, passes: has_start_date },
    Rule { field: "end_date", code: "end_before_start", message: END_DATE_NOT_BEFORE_START, passes: end_not_before_start },
];

fn has_user_id(request: &CreateUserEmploymentRequest) -> bool {
    request.user_id.is_some()
}

fn has_company(request: &CreateUserEmploymentRequest) -> bool {
    !request.company.trim().is_empty()
}

fn has_salary(request: &CreateUserEmploymentRequest) -> bool {
    request.salary.is_some()
}

fn salary_not_negative(request: &CreateUserEmploymentRequest) -> bool {
    request.salary.map_or(true, |salary| salary >= Decimal::ZERO)
}

fn has_start_date(request: &CreateUserEmploymentRequest) -> bool {
    request.start_date.is_some()
}

fn end_not_before_start(request: &CreateUserEmploymentRequest) -> bool {
    match (request.start_date, request.end_date) {
        (Some(start), Some(end)) => end >= start,
        _ => true,
    }
}

impl CreateUserEmploymentRequest {
    /// Checks every rule and returns the failures in rule order. An empty
    /// list means the request is valid.
    pub fn validation_failures(&self) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ordered_field_errors(&errors),
        }
    }

    /// Copies the employment fields into an insertable entity.
    ///
    /// Does not validate: a missing salary or start date falls back to the
    /// type default, so callers must run [`Self::validation_failures`] first.
    pub fn prepare_for_insert(&self) -> NewEmployment {
        NewEmployment {
            company: self.company.clone(),
            salary: self.salary.unwrap_or_default(),
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date,
        }
    }
}

impl Validate for CreateUserEmploymentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut failed = false;

        for rule in RULES.iter().filter(|rule| !(rule.passes)(self)) {
            let mut err = ValidationError::new(rule.code);
            err.message = Some(rule.message.into());
            errors.add(rule.field, err);
            failed = true;
        }

        if failed { Err(errors) } else { Ok(()) }
    }
}

/// Flattens `errors` into field failures, fields in rule order and each
/// field's failures in the order they were added.
pub fn ordered_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut fields: Vec<&'static str> = Vec::new();
    for rule in RULES {
        if !fields.contains(&rule.field) {
            fields.push(rule.field);
        }
    }

    fields
        .into_iter()
        .filter_map(|field| by_field.get(field).map(|errs| (field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError::new(
                field,
                e.message.as_deref().unwrap_or("Invalid value"),
            ))
        })
        .collect()
}

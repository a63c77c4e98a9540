mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::db;

use repositories::sqlx_repo::SqlxEmploymentRepo;
use use_cases::employment::EmploymentHandler;

pub struct AppState {
    pub employment_handler: AppEmploymentHandler,
}

pub type AppEmploymentHandler = EmploymentHandler<SqlxEmploymentRepo>;

impl AppState {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let employment_repo = SqlxEmploymentRepo::new(pool);
        let employment_handler = EmploymentHandler::new(employment_repo);

        AppState { employment_handler }
    }
}

use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxEmploymentRepo {
    pub pool: PgPool,
}

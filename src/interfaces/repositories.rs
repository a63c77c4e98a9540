pub mod employment;
pub mod sqlx_repo;

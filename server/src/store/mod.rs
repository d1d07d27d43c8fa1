// server/src/store/mod.rs

pub mod postgres;

pub use postgres::PgCatalogStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::errors::Result as AppResult;

/// Opens the pool and brings the schema up to date.
pub async fn connect_postgres(database_url: &str, max_connections: u32) -> AppResult<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(max_connections)
    .connect(database_url)
    .await?;
  tracing::info!("Successfully connected to the database.");

  sqlx::migrate!("./migrations").run(&pool).await?;
  tracing::info!("Database migrations applied.");
  Ok(pool)
}

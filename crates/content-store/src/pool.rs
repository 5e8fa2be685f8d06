use content_config::StoreConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::Result;

/// Build the shared connection pool from config. `sqlx::Json<T>` handles
/// jsonb/json column encoding on a per-query basis, so there is no
/// connection-level codec hook to install here.
pub async fn connect(config: &StoreConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Create a connection pool, retrying with a fixed delay.
///
/// Retrying lives here at the connection layer; domain operations never
/// retry and propagate storage failures as-is.
///
/// # Arguments
/// * `config` - Database url, pool size, and retry settings
///
/// # Returns
/// Connected PgPool
///
/// # Errors
/// The last connection error once all attempts are exhausted
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut last_error = None;

    for attempt in 1..=config.connect_attempts {
        tracing::info!(attempt, "Connecting to database");

        match PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
        {
            Ok(pool) => {
                tracing::info!(
                    max_connections = config.max_connections,
                    "Database connection pool created"
                );
                return Ok(pool);
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = config.connect_attempts,
                    error = %e,
                    "Database connection failed"
                );
                last_error = Some(e);
                tokio::time::sleep(Duration::from_millis(config.connect_retry_delay_ms)).await;
            }
        }
    }

    tracing::error!(
        attempts = config.connect_attempts,
        "Could not connect to the database"
    );
    Err(last_error.unwrap_or(sqlx::Error::PoolTimedOut))
}

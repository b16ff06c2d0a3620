/// Statement execution against PostgreSQL
///
/// Each call checks one connection out of the pool, runs a single read
/// statement, and returns the decoded `row_to_json` payloads. The checkout is
/// released on every exit path, including execution failure and cancellation.

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::sql::SqlQuery;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

/// Create a connection pool from the database configuration. Connections are
/// established lazily, so this does not touch the network by itself.
pub fn connect_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.connection_url())?;
    Ok(pool)
}

/// Execute a compiled statement and decode each row's `data` column into a
/// JSON object.
pub async fn fetch_json_rows(pool: &PgPool, query: &SqlQuery) -> Result<Vec<serde_json::Value>> {
    tracing::debug!(sql = %query.sql, params = ?query.params, "Executing query");

    let mut prepared = sqlx::query(&query.sql);
    for param in &query.params {
        prepared = prepared.bind(param.clone());
    }

    let rows = prepared.fetch_all(pool).await?;
    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        results.push(row.try_get::<serde_json::Value, _>("data")?);
    }
    Ok(results)
}

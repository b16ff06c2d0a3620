use crate::db;
use crate::error::Result;
use crate::schema::shapes::TableShape;
use crate::sql::{self, FilterInput};

use sqlx::PgPool;

/// Resolver body for one table: owns the compiled shape and the pool handle.
///
/// Created once at boot and shared read-only across requests; every `fetch`
/// call is independent and carries no state forward.
pub struct TableHandler {
    pub shape: TableShape,
    pool: PgPool,
}

impl TableHandler {
    pub fn new(shape: TableShape, pool: PgPool) -> Self {
        Self { shape, pool }
    }

    /// Compile the request into SQL and execute it, returning one JSON
    /// object per row keyed by the requested field names.
    ///
    /// `fields` is guaranteed by the engine to be a subset of the table's
    /// field shape; the compiler does not re-validate it.
    pub async fn fetch(
        &self,
        fields: &[String],
        filter: Option<&FilterInput>,
    ) -> Result<Vec<serde_json::Value>> {
        let query = sql::compile(&self.shape.table_name, fields, filter)?;
        db::fetch_json_rows(&self.pool, &query).await
    }
}

use crate::catalog::types::{identifier_valid, ColumnMetadata, TableMetadata};
use crate::error::Result;

use indexmap::IndexMap;
use sqlx::{PgPool, Row};

/// One catalog query joining table comments, column metadata and per-column
/// comments, restricted to ordinary tables outside the system schemas.
const CATALOG_QUERY: &str = r#"
    SELECT cols.table_name,
           cols.column_name,
           cols.data_type,
           obj_description(pc.oid) AS table_comment,
           col_description(pc.oid, cols.ordinal_position::int) AS column_comment
    FROM information_schema.columns AS cols
    JOIN pg_catalog.pg_class pc ON pc.relname = cols.table_name
    JOIN pg_catalog.pg_namespace pn
      ON pn.oid = pc.relnamespace AND pn.nspname = cols.table_schema
    WHERE cols.table_schema NOT IN ('pg_catalog', 'information_schema')
      AND pc.relkind = 'r'
"#;

/// A single row of the catalog query, before accumulation.
#[derive(Debug, Clone)]
pub(crate) struct CatalogRow {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub table_comment: Option<String>,
    pub column_comment: Option<String>,
}

/// Discovers user tables from the PostgreSQL catalog.
pub struct SchemaIntrospector {
    pool: PgPool,
}

impl SchemaIntrospector {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the catalog query and accumulate one `TableMetadata` per table.
    ///
    /// Column or table names that fail identifier validation are skipped
    /// with a warning; the table itself still builds from its remaining
    /// columns. Ordering follows the catalog, which guarantees nothing
    /// beyond each name appearing exactly once.
    pub async fn get(&self) -> Result<Vec<TableMetadata>> {
        let rows = sqlx::query(CATALOG_QUERY).fetch_all(&self.pool).await?;

        let rows = rows
            .into_iter()
            .map(|row| CatalogRow {
                table_name: row.get("table_name"),
                column_name: row.get("column_name"),
                data_type: row.get("data_type"),
                table_comment: row.get("table_comment"),
                column_comment: row.get("column_comment"),
            })
            .collect();

        Ok(collect_tables(rows))
    }
}

/// Accumulate raw catalog rows into normalized table metadata.
pub(crate) fn collect_tables(rows: Vec<CatalogRow>) -> Vec<TableMetadata> {
    let mut tables: IndexMap<String, TableMetadata> = IndexMap::new();

    for row in rows {
        if !identifier_valid(&row.table_name) {
            tracing::warn!(
                "Table '{}' has a non-simple name and will be ignored during introspection",
                row.table_name
            );
            continue;
        }
        if !identifier_valid(&row.column_name) {
            tracing::warn!(
                "Field '{}' from table '{}' could not be validated during introspection \
                 and will be ignored",
                row.column_name,
                row.table_name
            );
            continue;
        }

        let table = tables
            .entry(row.table_name.clone())
            .or_insert_with(|| TableMetadata {
                table_name: row.table_name.clone(),
                description: row.table_comment.clone(),
                columns: IndexMap::new(),
            });

        table.columns.insert(
            row.column_name.clone(),
            ColumnMetadata {
                name: row.column_name,
                data_type: row.data_type,
                description: row.column_comment,
            },
        );
    }

    tables.into_values().collect()
}

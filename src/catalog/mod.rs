/// PostgreSQL catalog introspection
///
/// This module discovers user tables, columns, types and comments from the
/// database catalog and normalizes them into `TableMetadata` values that the
/// schema builder consumes.

mod introspect;
mod types;

pub use introspect::SchemaIntrospector;
pub use types::{identifier_valid, ColumnMetadata, ScalarKind, TableMetadata};

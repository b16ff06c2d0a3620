use indexmap::IndexMap;
use serde::Serialize;

/// Semantic scalar a database column maps to for the query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Int,
    Float,
    Boolean,
}

impl ScalarKind {
    /// Resolve a catalog type name to a scalar kind.
    ///
    /// The mapping is deliberately fixed: anything outside it means the
    /// column cannot be represented by the flat filter model, and the table
    /// fails shape construction at boot.
    pub fn from_catalog_type(data_type: &str) -> Option<ScalarKind> {
        match data_type {
            "text" | "character varying" => Some(ScalarKind::String),
            "integer" => Some(ScalarKind::Int),
            "double precision" => Some(ScalarKind::Float),
            "boolean" => Some(ScalarKind::Boolean),
            _ => None,
        }
    }
}

/// A single column as reported by the catalog. `data_type` is the raw
/// catalog type name; it is resolved to a `ScalarKind` when the table's
/// GraphQL shape is built.
#[derive(Debug, Clone)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: String,
    pub description: Option<String>,
}

/// One user table as discovered by introspection. Built once at boot and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TableMetadata {
    pub table_name: String,
    pub description: Option<String>,
    pub columns: IndexMap<String, ColumnMetadata>,
}

impl TableMetadata {
    /// Externally visible type name: table name with the first letter
    /// capitalized.
    pub fn display_name(&self) -> String {
        let mut chars = self.table_name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// A simple SQL identifier: no dots, dashes or whitespace. Anything else
/// indicates a computed or qualified name the flat filter model cannot
/// address safely.
pub fn identifier_valid(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('.')
        && !name.contains('-')
        && !name.chars().any(char::is_whitespace)
}

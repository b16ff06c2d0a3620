/// Per-table GraphQL shapes
///
/// The `TypeRegistry` side of the system: resolves each column's catalog type
/// to a scalar kind and derives the table's field shape (readable output) and
/// filter shape (accepted comparator arguments). Comparator input objects are
/// shared across tables and registered once.

use crate::catalog::{ScalarKind, TableMetadata};
use crate::error::{Pg2GraphqlError, Result};

use async_graphql::dynamic::{InputObject, InputValue, TypeRef};
use serde::Serialize;

/// One readable/filterable column of a table shape.
#[derive(Debug, Clone)]
pub struct ColumnShape {
    pub name: String,
    pub kind: ScalarKind,
    pub description: Option<String>,
}

/// A table's compiled shape: validated table name, display name, and the
/// typed column set both the field shape and the filter shape derive from.
/// Built once at boot, read-only afterwards.
#[derive(Debug, Clone)]
pub struct TableShape {
    pub table_name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub columns: Vec<ColumnShape>,
}

/// Build a table's shape from introspection output.
///
/// A column whose catalog type has no scalar mapping fails the whole table:
/// the caller decides whether to exclude the table or abort startup.
pub fn build_shape(meta: &TableMetadata) -> Result<TableShape> {
    let mut columns = Vec::with_capacity(meta.columns.len());
    for column in meta.columns.values() {
        let kind = ScalarKind::from_catalog_type(&column.data_type).ok_or_else(|| {
            Pg2GraphqlError::SchemaGeneration(format!(
                "Table '{}' column '{}' has unsupported catalog type '{}'",
                meta.table_name, column.name, column.data_type
            ))
        })?;
        columns.push(ColumnShape {
            name: column.name.clone(),
            kind,
            description: column.description.clone(),
        });
    }

    Ok(TableShape {
        table_name: meta.table_name.clone(),
        display_name: meta.display_name(),
        description: meta.description.clone(),
        columns,
    })
}

impl TableShape {
    /// Name of the list field registered on the query root.
    pub fn field_name(&self) -> String {
        self.display_name.to_lowercase()
    }

    /// Name of this table's filter input object.
    pub fn filters_type_name(&self) -> String {
        format!("{}Filters", self.display_name)
    }

    pub fn column_kind(&self, name: &str) -> Option<ScalarKind> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.kind)
    }

    /// The table's filter input object: the reserved `operator` and `limit`
    /// keys plus one optional comparator argument per column.
    pub fn filter_input_object(&self) -> InputObject {
        let mut object = InputObject::new(self.filters_type_name())
            .field(
                InputValue::new("operator", TypeRef::named(TypeRef::STRING))
                    .description("Combinator joining all conditions: AND (default) or OR"),
            )
            .field(
                InputValue::new("limit", TypeRef::named(TypeRef::INT))
                    .description("Maximum number of rows (default 100, 0 for unlimited)"),
            );

        for column in &self.columns {
            let mut input = InputValue::new(
                column.name.clone(),
                TypeRef::named(comparator_type_name(column.kind)),
            );
            if let Some(desc) = &column.description {
                input = input.description(format!("Search {}", desc));
            }
            object = object.field(input);
        }

        object
    }
}

/// Serializable snapshot of one registered table, exposed as-is on the
/// introspection endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub name: String,
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: Vec<ColumnSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSnapshot {
    pub name: String,
    pub kind: ScalarKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&TableShape> for TableSnapshot {
    fn from(shape: &TableShape) -> Self {
        TableSnapshot {
            name: shape.display_name.clone(),
            table_name: shape.table_name.clone(),
            description: shape.description.clone(),
            columns: shape
                .columns
                .iter()
                .map(|column| ColumnSnapshot {
                    name: column.name.clone(),
                    kind: column.kind,
                    description: column.description.clone(),
                })
                .collect(),
        }
    }
}

/// Map a scalar kind to its GraphQL output type.
pub fn scalar_type_ref(kind: ScalarKind) -> TypeRef {
    match kind {
        ScalarKind::String => TypeRef::named(TypeRef::STRING),
        ScalarKind::Int => TypeRef::named(TypeRef::INT),
        ScalarKind::Float => TypeRef::named(TypeRef::FLOAT),
        ScalarKind::Boolean => TypeRef::named(TypeRef::BOOLEAN),
    }
}

fn comparator_type_name(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::String => "StringComparator",
        ScalarKind::Int => "IntComparator",
        ScalarKind::Float => "FloatComparator",
        ScalarKind::Boolean => "BooleanComparator",
    }
}

/// The shared comparator input objects, one per scalar kind.
pub fn comparator_input_objects() -> Vec<InputObject> {
    let string = InputObject::new("StringComparator")
        .field(InputValue::new("eq", TypeRef::named(TypeRef::STRING)).description("Equal operator"))
        .field(
            InputValue::new("like", TypeRef::named(TypeRef::STRING))
                .description("Substring match (wrapped in % wildcards)"),
        );

    let int = ordered_comparator("IntComparator", TypeRef::INT);
    let float = ordered_comparator("FloatComparator", TypeRef::FLOAT);

    let boolean = InputObject::new("BooleanComparator").field(
        InputValue::new("eq", TypeRef::named(TypeRef::BOOLEAN))
            .description("Equal operator for boolean"),
    );

    vec![string, int, float, boolean]
}

fn ordered_comparator(name: &str, scalar: &str) -> InputObject {
    InputObject::new(name)
        .field(InputValue::new("eq", TypeRef::named(scalar)).description("Equal operator"))
        .field(
            InputValue::new("lte", TypeRef::named(scalar))
                .description("Lower than or equal to operator"),
        )
        .field(InputValue::new("lt", TypeRef::named(scalar)).description("Lower than operator"))
        .field(
            InputValue::new("gte", TypeRef::named(scalar))
                .description("Greater than or equal to operator"),
        )
        .field(InputValue::new("gt", TypeRef::named(scalar)).description("Greater than operator"))
}

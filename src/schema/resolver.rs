/// GraphQL resolvers for query operations
///
/// One list resolver per table: it reads the selected leaf field names from
/// the engine's field-selection context, parses the `filters` argument into a
/// `FilterInput`, and delegates to the table's handler. Per-request failures
/// are converted into GraphQL errors and never crash the process.

use crate::catalog::ScalarKind;
use crate::error::CompileError;
use crate::schema::handler::TableHandler;
use crate::schema::shapes::TableShape;
use crate::sql::{FilterCondition, FilterInput, SqlParam};

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, ResolverContext, TypeRef};
use async_graphql::{Name, Value};
use indexmap::IndexMap;
use std::sync::Arc;

/// Create the list-valued query field for one table.
pub fn create_list_resolver(handler: Arc<TableHandler>) -> Field {
    let field_name = handler.shape.field_name();
    let type_name = handler.shape.display_name.clone();
    let filters_type = handler.shape.filters_type_name();
    let description = format!("List of {}", field_name);

    Field::new(
        field_name,
        TypeRef::named_nn_list_nn(type_name),
        move |ctx: ResolverContext| {
            let handler = handler.clone();

            FieldFuture::new(async move {
                // Leaf field names the caller actually selected.
                let fields: Vec<String> = ctx
                    .field()
                    .selection_set()
                    .map(|field| field.name().to_string())
                    .filter(|name| !name.starts_with("__"))
                    .collect();

                let filter = match ctx.args.get("filters") {
                    Some(value) => Some(parse_filter_input(
                        value.object()?.as_index_map(),
                        &handler.shape,
                    )?),
                    None => None,
                };

                let rows = handler
                    .fetch(&fields, filter.as_ref())
                    .await
                    .map_err(|e| async_graphql::Error::new(e.to_string()))?;

                let mut results = Vec::with_capacity(rows.len());
                for row in rows {
                    let value = Value::from_json(row)
                        .map_err(|e| format!("Failed to decode row: {}", e))?;
                    results.push(FieldValue::owned_any(value));
                }

                Ok(Some(FieldValue::list(results)))
            })
        },
    )
    .argument(InputValue::new("filters", TypeRef::named(filters_type)))
    .description(description)
}

/// Parse the `filters` argument into the compiler's input form, separating
/// the reserved `operator`/`limit` keys from the per-column comparator maps.
fn parse_filter_input(
    map: &IndexMap<Name, Value>,
    shape: &TableShape,
) -> async_graphql::Result<FilterInput> {
    let mut input = FilterInput::default();

    for (name, value) in map {
        if matches!(value, Value::Null) {
            continue;
        }
        match name.as_str() {
            "operator" => match value {
                Value::String(s) => input.operator = Some(s.clone()),
                _ => return Err(async_graphql::Error::new("operator must be a string")),
            },
            "limit" => match value {
                Value::Number(n) if n.as_i64().is_some() => input.limit = n.as_i64(),
                _ => return Err(async_graphql::Error::new("limit must be an integer")),
            },
            column => {
                // The engine only offers columns that exist in the filter
                // shape, so a miss here means a shape mismatch.
                let kind = shape.column_kind(column).ok_or_else(|| {
                    async_graphql::Error::new(format!("unknown filter column '{}'", column))
                })?;
                let Value::Object(comparators) = value else {
                    return Err(async_graphql::Error::new(format!(
                        "filter for column '{}' must be an object",
                        column
                    )));
                };

                for (comparator, raw) in comparators {
                    if matches!(raw, Value::Null) {
                        continue;
                    }
                    let param = parse_scalar(kind, raw).ok_or_else(|| {
                        async_graphql::Error::new(
                            CompileError::UnsupportedValue {
                                column: column.to_string(),
                                comparator: comparator.to_string(),
                            }
                            .to_string(),
                        )
                    })?;
                    input.conditions.push(FilterCondition {
                        column: column.to_string(),
                        comparator: comparator.to_string(),
                        value: param,
                    });
                }
            }
        }
    }

    Ok(input)
}

fn parse_scalar(kind: ScalarKind, value: &Value) -> Option<SqlParam> {
    match (kind, value) {
        (ScalarKind::String, Value::String(s)) => Some(SqlParam::Text(s.clone())),
        (ScalarKind::Int, Value::Number(n)) => n.as_i64().map(SqlParam::Int),
        (ScalarKind::Float, Value::Number(n)) => n.as_f64().map(SqlParam::Float),
        (ScalarKind::Boolean, Value::Boolean(b)) => Some(SqlParam::Bool(*b)),
        _ => None,
    }
}

use crate::error::CompileError;
use crate::sql::params::SqlParam;

/// Rows returned when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: i64 = 100;

/// One `column.comparator = value` condition from the `filters` argument.
#[derive(Debug, Clone)]
pub struct FilterCondition {
    pub column: String,
    pub comparator: String,
    pub value: SqlParam,
}

/// The runtime filter argument of one request, with the reserved `operator`
/// and `limit` keys already separated from the per-column conditions.
#[derive(Debug, Clone, Default)]
pub struct FilterInput {
    pub operator: Option<String>,
    pub limit: Option<i64>,
    pub conditions: Vec<FilterCondition>,
}

/// A compiled statement: SQL text with `$n` placeholders plus the values to
/// bind, in placeholder order.
#[derive(Debug, Clone)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// Compile `(table, requested fields, filter)` into one statement.
///
/// The statement selects the requested columns, applies every filter
/// condition joined by a single global combinator, wraps the result as a
/// named subquery and selects `row_to_json` over it, so each result row is
/// one JSON object keyed by the requested field names. A `LIMIT` is appended
/// unless the caller asked for `limit: 0`.
pub fn compile(
    table: &str,
    fields: &[String],
    filter: Option<&FilterInput>,
) -> Result<SqlQuery, CompileError> {
    if fields.is_empty() {
        return Err(CompileError::EmptyProjection);
    }

    let projection = fields
        .iter()
        .map(|field| format!("{}.\"{}\"", table, field))
        .collect::<Vec<_>>()
        .join(", ");

    let mut params = Vec::new();
    let where_clause = build_where_clause(table, filter, &mut params);

    let inner = format!("SELECT {} FROM {}{}", projection, table, where_clause);
    let mut sql = format!(
        "WITH {alias} AS ({inner}) SELECT row_to_json({alias}) AS data FROM {alias}",
        alias = table,
        inner = inner
    );

    match filter.and_then(|f| f.limit) {
        Some(n) if n < 0 => return Err(CompileError::InvalidLimit(n)),
        // limit = 0 means unlimited: no LIMIT clause at all.
        Some(0) => {}
        Some(n) => sql.push_str(&format!(" LIMIT {}", n)),
        None => sql.push_str(&format!(" LIMIT {}", DEFAULT_LIMIT)),
    }

    Ok(SqlQuery { sql, params })
}

fn build_where_clause(
    table: &str,
    filter: Option<&FilterInput>,
    params: &mut Vec<SqlParam>,
) -> String {
    let Some(filter) = filter else {
        return String::new();
    };

    let combinator = combinator(filter.operator.as_deref());
    let mut clause = String::new();

    for condition in &filter.conditions {
        let operator = sql_operator(&condition.comparator);
        let value = if condition.comparator == "like" {
            condition.value.like_pattern()
        } else {
            condition.value.clone()
        };
        params.push(value);

        let fragment = format!(
            "{}.\"{}\" {} ${}",
            table,
            condition.column,
            operator,
            params.len()
        );
        if clause.is_empty() {
            clause = format!(" WHERE {}", fragment);
        } else {
            clause.push_str(&format!(" {} {}", combinator, fragment));
        }
    }

    clause
}

/// Map a comparator key to its SQL operator. Unknown keys fall back to
/// equality.
fn sql_operator(comparator: &str) -> &'static str {
    match comparator {
        "eq" => "=",
        "gt" => ">",
        "gte" => ">=",
        "lt" => "<",
        "lte" => "<=",
        "like" => "LIKE",
        _ => "=",
    }
}

/// Resolve the global combinator joining all conditions. Case-insensitive
/// `AND`/`OR` plus the `&`/`|` shorthands; anything else defaults to `AND`.
fn combinator(operator: Option<&str>) -> &'static str {
    match operator.map(str::trim) {
        Some(op) if op.eq_ignore_ascii_case("or") || op == "|" => "OR",
        _ => "AND",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn condition(column: &str, comparator: &str, value: SqlParam) -> FilterCondition {
        FilterCondition {
            column: column.to_string(),
            comparator: comparator.to_string(),
            value,
        }
    }

    #[test]
    fn test_empty_projection_is_an_error() {
        let result = compile("users", &[], None);
        assert_eq!(result.unwrap_err(), CompileError::EmptyProjection);
    }

    #[test]
    fn test_plain_select_gets_default_limit() {
        let query = compile("users", &fields(&["id", "name"]), None).unwrap();
        assert_eq!(
            query.sql,
            "WITH users AS (SELECT users.\"id\", users.\"name\" FROM users) \
             SELECT row_to_json(users) AS data FROM users LIMIT 100"
        );
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_boolean_eq_with_explicit_limit() {
        // users(id int, name text, active boolean); fields {name};
        // filter {active: {eq: true}}; limit 2.
        let filter = FilterInput {
            operator: None,
            limit: Some(2),
            conditions: vec![condition("active", "eq", SqlParam::Bool(true))],
        };
        let query = compile("users", &fields(&["name"]), Some(&filter)).unwrap();
        assert_eq!(
            query.sql,
            "WITH users AS (SELECT users.\"name\" FROM users WHERE users.\"active\" = $1) \
             SELECT row_to_json(users) AS data FROM users LIMIT 2"
        );
        assert_eq!(query.params, vec![SqlParam::Bool(true)]);
    }

    #[test]
    fn test_like_wraps_value_in_wildcards() {
        let filter = FilterInput {
            conditions: vec![condition("name", "like", SqlParam::Text("an".into()))],
            ..Default::default()
        };
        let query = compile("users", &fields(&["name"]), Some(&filter)).unwrap();
        assert!(query.sql.contains("users.\"name\" LIKE $1"));
        assert_eq!(query.params, vec![SqlParam::Text("%an%".to_string())]);
    }

    #[test]
    fn test_limit_zero_omits_clause() {
        let filter = FilterInput {
            limit: Some(0),
            ..Default::default()
        };
        let query = compile("users", &fields(&["id"]), Some(&filter)).unwrap();
        assert!(!query.sql.contains("LIMIT"));
    }

    #[test]
    fn test_negative_limit_is_rejected() {
        let filter = FilterInput {
            limit: Some(-5),
            ..Default::default()
        };
        let result = compile("users", &fields(&["id"]), Some(&filter));
        assert_eq!(result.unwrap_err(), CompileError::InvalidLimit(-5));
    }

    #[test]
    fn test_combinator_defaults_to_and() {
        let filter = FilterInput {
            conditions: vec![
                condition("age", "gte", SqlParam::Int(18)),
                condition("age", "lt", SqlParam::Int(65)),
            ],
            ..Default::default()
        };
        let query = compile("users", &fields(&["id"]), Some(&filter)).unwrap();
        assert!(query.sql.contains("users.\"age\" >= $1 AND users.\"age\" < $2"));
        assert_eq!(query.params, vec![SqlParam::Int(18), SqlParam::Int(65)]);
    }

    #[test]
    fn test_combinator_or_is_case_insensitive() {
        for op in ["or", "OR", "Or", "|"] {
            let filter = FilterInput {
                operator: Some(op.to_string()),
                conditions: vec![
                    condition("name", "eq", SqlParam::Text("ada".into())),
                    condition("name", "eq", SqlParam::Text("grace".into())),
                ],
                ..Default::default()
            };
            let query = compile("users", &fields(&["name"]), Some(&filter)).unwrap();
            assert!(query.sql.contains("$1 OR users.\"name\" = $2"), "op={}", op);
        }
    }

    #[test]
    fn test_unknown_operator_defaults_to_and() {
        let filter = FilterInput {
            operator: Some("xor".to_string()),
            conditions: vec![
                condition("a", "eq", SqlParam::Int(1)),
                condition("b", "eq", SqlParam::Int(2)),
            ],
            ..Default::default()
        };
        let query = compile("t", &fields(&["a"]), Some(&filter)).unwrap();
        assert!(query.sql.contains("$1 AND t.\"b\" = $2"));
    }

    #[test]
    fn test_unknown_comparator_falls_back_to_equality() {
        let filter = FilterInput {
            conditions: vec![condition("name", "matches", SqlParam::Text("x".into()))],
            ..Default::default()
        };
        let query = compile("users", &fields(&["name"]), Some(&filter)).unwrap();
        assert!(query.sql.contains("users.\"name\" = $1"));
    }

    #[test]
    fn test_numeric_comparators() {
        for (comparator, operator) in [("gt", ">"), ("gte", ">="), ("lt", "<"), ("lte", "<=")] {
            let filter = FilterInput {
                conditions: vec![condition("price", comparator, SqlParam::Float(9.5))],
                ..Default::default()
            };
            let query = compile("items", &fields(&["price"]), Some(&filter)).unwrap();
            assert!(
                query.sql.contains(&format!("items.\"price\" {} $1", operator)),
                "comparator={}",
                comparator
            );
        }
    }

    #[test]
    fn test_conditions_flatten_into_one_chain() {
        // Conditions across different columns share the single global
        // combinator; there is no grouping.
        let filter = FilterInput {
            operator: Some("or".to_string()),
            conditions: vec![
                condition("age", "gt", SqlParam::Int(30)),
                condition("name", "like", SqlParam::Text("li".into())),
                condition("active", "eq", SqlParam::Bool(false)),
            ],
            ..Default::default()
        };
        let query = compile("users", &fields(&["id"]), Some(&filter)).unwrap();
        assert!(query.sql.contains(
            "WHERE users.\"age\" > $1 OR users.\"name\" LIKE $2 OR users.\"active\" = $3"
        ));
        assert_eq!(query.params.len(), 3);
    }
}

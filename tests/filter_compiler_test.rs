/// End-to-end assertions on the filter compiler through the public API.

use pg2graphql::sql::{compile, FilterCondition, FilterInput, SqlParam};
use pg2graphql::CompileError;

#[test]
fn active_users_limited_to_two() {
    // users(id int, name text, active boolean); fields {name};
    // filter {active: {eq: true}}, limit 2.
    let filter = FilterInput {
        operator: None,
        limit: Some(2),
        conditions: vec![FilterCondition {
            column: "active".to_string(),
            comparator: "eq".to_string(),
            value: SqlParam::Bool(true),
        }],
    };

    let query = compile("users", &["name".to_string()], Some(&filter)).unwrap();
    assert_eq!(
        query.sql,
        "WITH users AS (SELECT users.\"name\" FROM users WHERE users.\"active\" = $1) \
         SELECT row_to_json(users) AS data FROM users LIMIT 2"
    );
    assert_eq!(query.params, vec![SqlParam::Bool(true)]);
}

#[test]
fn like_performs_substring_match() {
    let filter = FilterInput {
        conditions: vec![FilterCondition {
            column: "name".to_string(),
            comparator: "like".to_string(),
            value: SqlParam::Text("an".to_string()),
        }],
        ..Default::default()
    };

    let query = compile("users", &["name".to_string()], Some(&filter)).unwrap();
    assert!(query.sql.contains("users.\"name\" LIKE $1"));
    assert_eq!(query.params, vec![SqlParam::Text("%an%".to_string())]);
}

#[test]
fn empty_projection_is_rejected_before_any_database_call() {
    let result = compile("users", &[], None);
    assert_eq!(result.unwrap_err(), CompileError::EmptyProjection);
}

#[test]
fn identical_inputs_compile_identically() {
    let filter = FilterInput {
        operator: Some("or".to_string()),
        limit: Some(10),
        conditions: vec![FilterCondition {
            column: "id".to_string(),
            comparator: "gte".to_string(),
            value: SqlParam::Int(5),
        }],
    };
    let fields = vec!["id".to_string(), "name".to_string()];

    let first = compile("users", &fields, Some(&filter)).unwrap();
    let second = compile("users", &fields, Some(&filter)).unwrap();
    assert_eq!(first.sql, second.sql);
    assert_eq!(first.params, second.params);
}

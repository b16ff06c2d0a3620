/// Filter-to-SQL compilation
///
/// Pure functions turning `(table, requested fields, filter)` into a single
/// parameterized SQL statement. Values are always bound positionally, never
/// interpolated into the statement text.

mod compiler;
mod params;

pub use compiler::{compile, FilterCondition, FilterInput, SqlQuery, DEFAULT_LIMIT};
pub use params::SqlParam;

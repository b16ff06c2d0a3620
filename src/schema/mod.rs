/// GraphQL schema generation from PostgreSQL tables
///
/// This module turns introspected table metadata into a dynamic GraphQL
/// schema: per-table object types and filter inputs, shared comparator
/// inputs, and SQL-backed list resolvers.

mod builder;
mod handler;
mod resolver;
mod shapes;

pub use builder::SchemaBuilder;
pub use handler::TableHandler;
pub use resolver::create_list_resolver;
pub use shapes::{
    build_shape, comparator_input_objects, ColumnShape, ColumnSnapshot, TableShape, TableSnapshot,
};

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod schema;
pub mod sql;

// Re-export commonly used types
pub use catalog::{SchemaIntrospector, TableMetadata};
pub use config::{Config, DatabaseConfig, ServerConfig};
pub use error::{CompileError, Pg2GraphqlError, Result};
pub use schema::SchemaBuilder;

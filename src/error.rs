use thiserror::Error;

#[derive(Error, Debug)]
pub enum Pg2GraphqlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema generation error: {0}")]
    SchemaGeneration(String),

    #[error("Filter compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by the filter compiler before any database call is made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompileError {
    #[error("query must select at least one field")]
    EmptyProjection,

    #[error("limit must not be negative (got {0})")]
    InvalidLimit(i64),

    #[error("unsupported value for filter '{column}.{comparator}'")]
    UnsupportedValue { column: String, comparator: String },
}

impl From<toml::de::Error> for Pg2GraphqlError {
    fn from(err: toml::de::Error) -> Self {
        Pg2GraphqlError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<serde_json::Error> for Pg2GraphqlError {
    fn from(err: serde_json::Error) -> Self {
        Pg2GraphqlError::Serialization(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Pg2GraphqlError>;

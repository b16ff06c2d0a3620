use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A filter value that can be bound to a PostgreSQL query placeholder.
///
/// The variant is fixed by the column's scalar kind when the filter argument
/// is parsed, so the wire encoding always matches the comparator's declared
/// GraphQL type.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl SqlParam {
    /// Render the value as the inner text of a `%...%` LIKE pattern.
    pub fn like_pattern(&self) -> SqlParam {
        let inner = match self {
            SqlParam::Text(s) => s.clone(),
            SqlParam::Int(n) => n.to_string(),
            SqlParam::Float(f) => f.to_string(),
            SqlParam::Bool(b) => b.to_string(),
        };
        SqlParam::Text(format!("%{}%", inner))
    }
}

impl<'q> Encode<'q, Postgres> for SqlParam {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            SqlParam::Text(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)
            }
            SqlParam::Int(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf),
            SqlParam::Float(f) => <f64 as Encode<Postgres>>::encode_by_ref(f, buf),
            SqlParam::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlParam::Text(_) => <&str as Type<Postgres>>::type_info(),
            SqlParam::Int(_) => <i64 as Type<Postgres>>::type_info(),
            SqlParam::Float(_) => <f64 as Type<Postgres>>::type_info(),
            SqlParam::Bool(_) => <bool as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for SqlParam {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }
}

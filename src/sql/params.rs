//! Convert serde_json::Value to types that sqlx can bind.

use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::sqlite::Sqlite;
use sqlx::Database;

/// A value that can be bound to a SQLite query. Converts from serde_json::Value.
#[derive(Clone, Debug)]
pub enum SqliteBindValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Text(String),
}

impl SqliteBindValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => SqliteBindValue::Null,
            Value::Bool(b) => SqliteBindValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SqliteBindValue::I64(i)
                } else {
                    SqliteBindValue::F64(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => SqliteBindValue::Text(s.clone()),
            // Composite values are stored as their JSON text.
            Value::Array(_) | Value::Object(_) => SqliteBindValue::Text(v.to_string()),
        }
    }
}

impl<'q> Encode<'q, Sqlite> for SqliteBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            SqliteBindValue::Null => {
                <Option<i64> as Encode<Sqlite>>::encode_by_ref(&None, buf)?
            }
            SqliteBindValue::Bool(b) => <bool as Encode<Sqlite>>::encode_by_ref(b, buf)?,
            SqliteBindValue::I64(n) => <i64 as Encode<Sqlite>>::encode_by_ref(n, buf)?,
            SqliteBindValue::F64(n) => <f64 as Encode<Sqlite>>::encode_by_ref(n, buf)?,
            SqliteBindValue::Text(s) => <String as Encode<Sqlite>>::encode_by_ref(s, buf)?,
        })
    }
}

impl sqlx::Type<Sqlite> for SqliteBindValue {
    fn type_info() -> <Sqlite as Database>::TypeInfo {
        <str as sqlx::Type<Sqlite>>::type_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_map_to_bind_kinds() {
        assert!(matches!(
            SqliteBindValue::from_json(&json!(null)),
            SqliteBindValue::Null
        ));
        assert!(matches!(
            SqliteBindValue::from_json(&json!(7)),
            SqliteBindValue::I64(7)
        ));
        assert!(matches!(
            SqliteBindValue::from_json(&json!(1.5)),
            SqliteBindValue::F64(_)
        ));
        assert!(matches!(
            SqliteBindValue::from_json(&json!("Rex")),
            SqliteBindValue::Text(_)
        ));
        assert!(matches!(
            SqliteBindValue::from_json(&json!(true)),
            SqliteBindValue::Bool(true)
        ));
    }
}

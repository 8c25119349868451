//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the pets table.

use crate::validation::FieldSet;
use serde_json::Value;

/// Quote an identifier for SQLite.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }
}

/// Field names in a stable order so generated statements are deterministic.
fn sorted_keys(fields: &FieldSet) -> Vec<&str> {
    let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

/// SELECT with optional projection (all columns when absent), raw selection
/// with `?` placeholders bound from `args`, and optional ORDER BY.
pub fn select(
    table: &str,
    projection: Option<&[&str]>,
    selection: Option<&str>,
    args: &[Value],
    sort_order: Option<&str>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols = match projection {
        Some(cols) => cols.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", "),
        None => "*".to_string(),
    };
    q.sql = format!("SELECT {} FROM {}", cols, quoted(table));
    if let Some(sel) = selection {
        q.sql.push_str(" WHERE ");
        q.sql.push_str(sel);
        q.params.extend(args.iter().cloned());
    }
    if let Some(order) = sort_order {
        q.sql.push_str(" ORDER BY ");
        q.sql.push_str(order);
    }
    q
}

/// INSERT from a field set. Null values are omitted so column defaults apply.
pub fn insert(table: &str, fields: &FieldSet) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for key in sorted_keys(fields) {
        let val = &fields[key];
        if val.is_null() {
            continue;
        }
        cols.push(quoted(key));
        placeholders.push("?");
        q.params.push(val.clone());
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(table),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE setting every field in the set (nulls included, so nullable columns
/// can be cleared), narrowed by the raw selection when present.
pub fn update(table: &str, fields: &FieldSet, selection: Option<&str>, args: &[Value]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for key in sorted_keys(fields) {
        sets.push(format!("{} = ?", quoted(key)));
        q.params.push(fields[key].clone());
    }
    q.sql = format!("UPDATE {} SET {}", quoted(table), sets.join(", "));
    if let Some(sel) = selection {
        q.sql.push_str(" WHERE ");
        q.sql.push_str(sel);
        q.params.extend(args.iter().cloned());
    }
    q
}

/// DELETE narrowed by the raw selection when present; deletes all rows otherwise.
pub fn delete(table: &str, selection: Option<&str>, args: &[Value]) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("DELETE FROM {}", quoted(table));
    if let Some(sel) = selection {
        q.sql.push_str(" WHERE ");
        q.sql.push_str(sel);
        q.params.extend(args.iter().cloned());
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_all_columns_no_selection() {
        let q = select("pets", None, None, &[], None);
        assert_eq!(q.sql, "SELECT * FROM \"pets\"");
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_with_projection_selection_and_order() {
        let q = select(
            "pets",
            Some(&["id", "name"]),
            Some("gender = ?"),
            &[json!(1)],
            Some("name"),
        );
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"name\" FROM \"pets\" WHERE gender = ? ORDER BY name"
        );
        assert_eq!(q.params, vec![json!(1)]);
    }

    #[test]
    fn insert_skips_null_values_and_orders_columns() {
        let fields = FieldSet::from([
            ("name".into(), json!("Rex")),
            ("breed".into(), json!(null)),
            ("gender".into(), json!(1)),
        ]);
        let q = insert("pets", &fields);
        assert_eq!(
            q.sql,
            "INSERT INTO \"pets\" (\"gender\", \"name\") VALUES (?, ?)"
        );
        assert_eq!(q.params, vec![json!(1), json!("Rex")]);
    }

    #[test]
    fn update_binds_sets_before_selection_args() {
        let fields = FieldSet::from([("weight".into(), json!(22))]);
        let q = update("pets", &fields, Some("id = ?"), &[json!(3)]);
        assert_eq!(q.sql, "UPDATE \"pets\" SET \"weight\" = ? WHERE id = ?");
        assert_eq!(q.params, vec![json!(22), json!(3)]);
    }

    #[test]
    fn update_keeps_nulls_so_columns_can_be_cleared() {
        let fields = FieldSet::from([("breed".into(), json!(null))]);
        let q = update("pets", &fields, None, &[]);
        assert_eq!(q.sql, "UPDATE \"pets\" SET \"breed\" = ?");
        assert_eq!(q.params, vec![json!(null)]);
    }

    #[test]
    fn delete_without_selection_targets_all_rows() {
        let q = delete("pets", None, &[]);
        assert_eq!(q.sql, "DELETE FROM \"pets\"");
        let q = delete("pets", Some("id = ?"), &[json!(9)]);
        assert_eq!(q.sql, "DELETE FROM \"pets\" WHERE id = ?");
        assert_eq!(q.params, vec![json!(9)]);
    }
}

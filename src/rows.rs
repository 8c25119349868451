//! Lazy row cursor over query output.
//!
//! Rows are streamed by a background task that holds one pooled connection
//! for the life of the cursor; dropping (or closing) the cursor aborts the
//! task and returns the connection deterministically.

use crate::error::ProviderError;
use crate::sql::{QueryBuf, SqliteBindValue};
use futures_util::StreamExt;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const ROW_BUFFER: usize = 16;

/// Sequentially-consumed row handle produced by `PetProvider::query`.
pub struct RowSet {
    rx: mpsc::Receiver<Result<Value, sqlx::Error>>,
    task: JoinHandle<()>,
}

impl RowSet {
    pub(crate) fn spawn(pool: SqlitePool, query: QueryBuf) -> RowSet {
        let (tx, rx) = mpsc::channel(ROW_BUFFER);
        let task = tokio::spawn(async move {
            if let Err(e) = stream_rows(pool, query, &tx).await {
                let _ = tx.send(Err(e)).await;
            }
        });
        RowSet { rx, task }
    }

    /// Next row as a JSON object, or None when the sequence is exhausted.
    pub async fn next_row(&mut self) -> Option<Result<Value, ProviderError>> {
        self.rx.recv().await.map(|r| r.map_err(ProviderError::from))
    }

    /// Drain the remaining rows into a Vec, closing the cursor.
    pub async fn collect_rows(mut self) -> Result<Vec<Value>, ProviderError> {
        let mut out = Vec::new();
        while let Some(row) = self.next_row().await {
            out.push(row?);
        }
        Ok(out)
    }

    /// Release the cursor without consuming the remaining rows.
    pub fn close(self) {}
}

impl Drop for RowSet {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn stream_rows(
    pool: SqlitePool,
    q: QueryBuf,
    tx: &mpsc::Sender<Result<Value, sqlx::Error>>,
) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = query.bind(SqliteBindValue::from_json(p));
    }
    let mut rows = query.fetch(&mut *conn);
    while let Some(row) = rows.next().await {
        let row = row?;
        if tx.send(Ok(row_to_json(&row))).await.is_err() {
            // Consumer closed the cursor early.
            break;
        }
    }
    Ok(())
}

pub(crate) fn row_to_json(row: &SqliteRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &SqliteRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}

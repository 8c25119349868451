//! The pet provider: resolves URIs to routes, validates writes, executes
//! parameterized statements, and publishes change notifications.
//!
//! This is the only component that turns an externally supplied URI plus an
//! operation into a storage call, and the only publisher of change events.

use crate::config::StoreConfig;
use crate::contract::{self, COL_ID, CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE, TABLE};
use crate::db::ShelterDb;
use crate::error::ProviderError;
use crate::notify::{ChangeEvent, ChangeHub, ChangeKind, ChangeObserver, SubscriptionId};
use crate::rows::RowSet;
use crate::sql::{self, QueryBuf, SqliteBindValue};
use crate::uri::{Route, UriMatcher};
use crate::validation::{validate_insert, validate_update, FieldSet};
use serde_json::{json, Value};
use sqlx::sqlite::SqliteQueryResult;

pub struct PetProvider {
    db: ShelterDb,
    matcher: UriMatcher,
    hub: ChangeHub,
}

impl PetProvider {
    pub fn new(db: ShelterDb) -> Self {
        PetProvider {
            db,
            matcher: UriMatcher::default(),
            hub: ChangeHub::new(),
        }
    }

    /// Open the store named by `config` and wrap it in a provider.
    pub async fn open(config: &StoreConfig) -> Result<Self, ProviderError> {
        let db = ShelterDb::open(&config.database_path).await?;
        Ok(PetProvider::new(db))
    }

    /// Register an observer for change events. The observer is called
    /// synchronously from the mutating call; it receives every event and
    /// filters on `ChangeEvent::uri` for the resources it watches.
    pub fn subscribe(&self, observer: ChangeObserver) -> SubscriptionId {
        self.hub.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.hub.unsubscribe(id)
    }

    /// Query the records addressed by `uri`. Item routes synthesize an
    /// `id = ?` selection and ignore the caller's selection and sort order,
    /// so they can never return more than the one named record.
    ///
    /// The returned cursor holds a pooled connection until consumed, closed,
    /// or dropped. Must be called from within a tokio runtime.
    pub fn query(
        &self,
        uri: &str,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        args: &[Value],
        sort_order: Option<&str>,
    ) -> Result<RowSet, ProviderError> {
        let q = match self.matcher.resolve(uri)? {
            Route::Collection => sql::select(TABLE, projection, selection, args, sort_order),
            Route::Item(id) => {
                let sel = id_selection();
                sql::select(TABLE, projection, Some(sel.as_str()), &[json!(id)], None)
            }
        };
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(RowSet::spawn(self.db.read_pool().clone(), q))
    }

    /// Content-type tag for the resource addressed by `uri`.
    pub fn resolve_type(&self, uri: &str) -> Result<&'static str, ProviderError> {
        Ok(match self.matcher.resolve(uri)? {
            Route::Collection => CONTENT_LIST_TYPE,
            Route::Item(_) => CONTENT_ITEM_TYPE,
        })
    }

    /// Insert a validated record. Only valid on the collection route.
    /// Returns the URI of the new item and publishes an insert event.
    pub async fn insert(&self, uri: &str, fields: &FieldSet) -> Result<String, ProviderError> {
        match self.matcher.resolve(uri)? {
            Route::Collection => {}
            Route::Item(_) => {
                return Err(ProviderError::Routing(format!(
                    "insert is not supported on item uri {}",
                    uri
                )))
            }
        }
        validate_insert(fields)?;
        let q = sql::insert(TABLE, fields);
        let result = self.execute(&q).await?;
        if result.rows_affected() == 0 {
            tracing::error!(%uri, "insert created no row");
            return Err(ProviderError::Storage(format!(
                "insert created no row for {}",
                uri
            )));
        }
        let new_uri = contract::item_uri(result.last_insert_rowid());
        self.hub.publish(&ChangeEvent {
            uri: uri.to_string(),
            kind: ChangeKind::Insert,
        });
        Ok(new_uri)
    }

    /// Update the records addressed by `uri` with the fields present in the
    /// set. An empty set is a no-op returning 0 without touching storage.
    /// Publishes an update event when at least one row changed.
    pub async fn update(
        &self,
        uri: &str,
        fields: &FieldSet,
        selection: Option<&str>,
        args: &[Value],
    ) -> Result<u64, ProviderError> {
        let route = self.matcher.resolve(uri)?;
        if fields.is_empty() {
            return Ok(0);
        }
        validate_update(fields)?;
        let q = match route {
            Route::Collection => sql::update(TABLE, fields, selection, args),
            Route::Item(id) => {
                let sel = id_selection();
                sql::update(TABLE, fields, Some(sel.as_str()), &[json!(id)])
            }
        };
        let affected = self.execute(&q).await?.rows_affected();
        if affected > 0 {
            self.hub.publish(&ChangeEvent {
                uri: uri.to_string(),
                kind: ChangeKind::Update,
            });
        }
        Ok(affected)
    }

    /// Delete the records addressed by `uri`. Deleting a non-existent id
    /// returns 0, not an error. Publishes a delete event when at least one
    /// row was removed.
    pub async fn delete(
        &self,
        uri: &str,
        selection: Option<&str>,
        args: &[Value],
    ) -> Result<u64, ProviderError> {
        let q = match self.matcher.resolve(uri)? {
            Route::Collection => sql::delete(TABLE, selection, args),
            Route::Item(id) => {
                let sel = id_selection();
                sql::delete(TABLE, Some(sel.as_str()), &[json!(id)])
            }
        };
        let affected = self.execute(&q).await?.rows_affected();
        if affected > 0 {
            self.hub.publish(&ChangeEvent {
                uri: uri.to_string(),
                kind: ChangeKind::Delete,
            });
        }
        Ok(affected)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<SqliteQueryResult, ProviderError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(SqliteBindValue::from_json(p));
        }
        Ok(query.execute(self.db.write_pool()).await?)
    }
}

fn id_selection() -> String {
    format!("{} = ?", COL_ID)
}

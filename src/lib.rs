//! Shelter store: URI-addressed single-table CRUD over a local SQLite store.
//!
//! Consumers address records through `content://` URIs (whole collection or
//! one item by id), and the [`PetProvider`] routes each operation to a
//! validated, parameterized statement, publishing change events after
//! successful mutations.

pub mod config;
pub mod contract;
pub mod db;
pub mod error;
pub mod notify;
pub mod provider;
pub mod rows;
pub mod sql;
pub mod uri;
pub mod validation;

pub use config::StoreConfig;
pub use contract::{Gender, Pet};
pub use db::ShelterDb;
pub use error::{ProviderError, ValidationError};
pub use notify::{ChangeEvent, ChangeKind, ChangeObserver, SubscriptionId};
pub use provider::PetProvider;
pub use rows::RowSet;
pub use uri::{Route, UriMatcher};
pub use validation::FieldSet;

//! Parameterized SQL construction and bind-value conversion.

pub mod builder;
pub mod params;

pub use builder::{delete, insert, select, update, QueryBuf};
pub use params::SqliteBindValue;

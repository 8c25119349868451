//! Environment-based configuration for the store location.

use std::path::PathBuf;

/// Env var naming the store file; falls back to `shelter.db` in the working
/// directory.
pub const ENV_DATABASE_PATH: &str = "SHELTER_DB";

const DEFAULT_DATABASE_PATH: &str = "shelter.db";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_path: PathBuf,
}

impl StoreConfig {
    /// Load from the environment, reading a `.env` file when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let path = std::env::var(ENV_DATABASE_PATH)
            .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());
        StoreConfig {
            database_path: PathBuf::from(path),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

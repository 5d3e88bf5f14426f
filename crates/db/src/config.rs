//! # Store Configuration
//!
//! Selects and configures the slot store backend from environment variables:
//!
//! - `SLOT_STORE`: `postgres` (default), `firebase` or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string (postgres backend)
//! - `FIREBASE_DATABASE_URL`: Realtime Database base URL (firebase backend)
//! - `FIREBASE_AUTH_TOKEN`: optional `auth` query token for Firebase requests
//! - `FIREBASE_ROOT`: path under which provider lists live (default: "appointments")

use eyre::{eyre, Result, WrapErr};
use std::env;

pub const DEFAULT_FIREBASE_ROOT: &str = "appointments";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres {
        database_url: String,
    },
    Firebase {
        database_url: String,
        auth_token: Option<String>,
        root: String,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl StoreConfig {
    /// Load store configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let kind = env::var("SLOT_STORE").unwrap_or_else(|_| "postgres".to_string());
        Self::from_parts(
            &kind,
            env::var("DATABASE_URL").ok(),
            env::var("FIREBASE_DATABASE_URL").ok(),
            env::var("FIREBASE_AUTH_TOKEN").ok(),
            env::var("FIREBASE_ROOT").ok(),
        )
    }

    /// Builds a configuration from already-collected values.
    ///
    /// Used by `from_env` and by the CLI, whose flags may override the environment.
    pub fn from_parts(
        kind: &str,
        database_url: Option<String>,
        firebase_url: Option<String>,
        firebase_auth_token: Option<String>,
        firebase_root: Option<String>,
    ) -> Result<Self> {
        let backend = match kind.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => StoreBackend::Postgres {
                database_url: database_url
                    .ok_or_else(|| eyre!("DATABASE_URL must be set for the postgres slot store"))?,
            },
            "firebase" => StoreBackend::Firebase {
                database_url: firebase_url
                    .ok_or_else(|| eyre!("FIREBASE_DATABASE_URL must be set for the firebase slot store"))
                    .wrap_err("Invalid firebase store configuration")?,
                auth_token: firebase_auth_token.filter(|token| !token.is_empty()),
                root: firebase_root.unwrap_or_else(|| DEFAULT_FIREBASE_ROOT.to_string()),
            },
            "memory" => StoreBackend::Memory,
            other => return Err(eyre!("Unknown SLOT_STORE value '{}'", other)),
        };

        Ok(Self { backend })
    }
}

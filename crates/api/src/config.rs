//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotbook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 5001)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `SLOT_DURATION_MINUTES`: Length of a single appointment slot (default: 60)
//!
//! Store selection (`SLOT_STORE`, `DATABASE_URL`, `FIREBASE_*`) is read by
//! [`StoreConfig::from_env`].

use eyre::{Result, WrapErr};
use slotbook_core::{policy::DEFAULT_SLOT_MINUTES, validation::validate_slot_duration};
use slotbook_db::config::StoreConfig;
use std::env;
use tracing::Level;

/// Configuration for the Slotbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Slot store backend and its connection settings
    pub store: StoreConfig,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Exact length required of a single created slot, in minutes
    pub slot_duration_minutes: i64,
}

/// Maps a `LOG_LEVEL` value to a tracing level, defaulting to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Reads `SLOT_DURATION_MINUTES`, defaulting to one hour.
pub fn parse_slot_duration(value: Option<&str>) -> Result<i64> {
    let minutes = match value {
        Some(value) => value
            .trim()
            .parse()
            .wrap_err("Invalid SLOT_DURATION_MINUTES value")?,
        None => DEFAULT_SLOT_MINUTES,
    };
    validate_slot_duration(minutes)?;
    Ok(minutes)
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - SLOT_DURATION_MINUTES is not a positive multiple of 60
    /// - The store configuration is incomplete (see [`StoreConfig::from_env`])
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Store settings
        let store = StoreConfig::from_env()?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Scheduling settings
        let slot_duration_minutes =
            parse_slot_duration(env::var("SLOT_DURATION_MINUTES").ok().as_deref())?;

        Ok(Self {
            host,
            port,
            store,
            log_level,
            cors_origins,
            request_timeout,
            slot_duration_minutes,
        })
    }

    /// Returns the server address as a string
    ///
    /// # Returns
    ///
    /// * `String` - Formatted server address (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub mod config;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod stores;

pub mod mock;

use std::sync::Arc;

use eyre::Result;
use slotbook_core::{KeyValueStore, MemoryStore};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::stores::{firebase::FirebaseStore, postgres::PgStore};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Builds the store client selected by `config`.
///
/// The Postgres backend also makes sure its table exists.
pub async fn connect_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    match &config.backend {
        StoreBackend::Postgres { database_url } => {
            info!("Connecting to Postgres slot store...");
            let pool = create_pool(database_url).await?;
            schema::initialize_database(&pool).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreBackend::Firebase {
            database_url,
            auth_token,
            root,
        } => {
            info!("Using Firebase slot store at {}", database_url);
            let store = FirebaseStore::new(database_url, root, auth_token.clone())?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!("Using in-memory slot store; slots are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

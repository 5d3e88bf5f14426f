use clap::Args;
use eyre::Result;
use slotbook_db::config::StoreConfig;

/// Store selection flags. Each falls back to the variable the server reads.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Slot store backend (postgres, firebase, memory).
    #[arg(long = "store", env = "SLOT_STORE", default_value = "postgres", global = true)]
    pub kind: String,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Firebase Realtime Database base URL.
    #[arg(long, env = "FIREBASE_DATABASE_URL", global = true)]
    pub firebase_url: Option<String>,

    /// Firebase `auth` token.
    #[arg(long, env = "FIREBASE_AUTH_TOKEN", global = true, hide_env_values = true)]
    pub firebase_auth_token: Option<String>,

    /// Path under which provider slot lists are stored.
    #[arg(long, env = "FIREBASE_ROOT", global = true)]
    pub firebase_root: Option<String>,
}

impl StoreArgs {
    pub fn to_store_config(&self) -> Result<StoreConfig> {
        StoreConfig::from_parts(
            &self.kind,
            self.database_url.clone(),
            self.firebase_url.clone(),
            self.firebase_auth_token.clone(),
            self.firebase_root.clone(),
        )
    }
}

//! Firebase Realtime Database over its REST interface.
//!
//! Each provider list lives at `{database_url}/{root}/{key}.json`. Reads of a
//! missing path return JSON `null`; writes are a single `PUT` of the document.

use async_trait::async_trait;
use eyre::{eyre, Result, WrapErr};
use serde_json::Value;
use slotbook_core::KeyValueStore;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: reqwest::Client,
    base_url: String,
    root: String,
    auth_token: Option<String>,
}

impl FirebaseStore {
    pub fn new(database_url: &str, root: &str, auth_token: Option<String>) -> Result<Self> {
        let base_url = database_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(eyre!("Firebase database URL must be http(s): {}", database_url));
        }

        let client = reqwest::Client::builder()
            .build()
            .wrap_err("Failed to build Firebase HTTP client")?;

        Ok(Self {
            client,
            base_url,
            root: root.trim_matches('/').to_string(),
            auth_token,
        })
    }

    /// REST URL for a key. The key is percent-encoded so it stays one path segment.
    pub fn document_url(&self, key: &str) -> String {
        let key = urlencoding::encode(key);
        if self.root.is_empty() {
            format!("{}/{}.json", self.base_url, key)
        } else {
            format!("{}/{}/{}.json", self.base_url, self.root, key)
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token.as_str())]),
            None => request,
        }
    }
}

#[async_trait]
impl KeyValueStore for FirebaseStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let url = self.document_url(key);
        debug!("Fetching Firebase document {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(eyre!("Firebase read failed ({}): {}", status, error_text));
        }

        let value: Value = response.json().await?;
        Ok(match value {
            Value::Null => None,
            value => Some(value),
        })
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let url = self.document_url(key);
        debug!("Writing Firebase document {}", url);

        let response = self
            .authorize(self.client.put(&url))
            .json(&value)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(eyre!("Firebase write failed ({}): {}", status, error_text));
        }

        Ok(())
    }
}

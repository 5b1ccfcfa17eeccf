//! Redis-backed profile document store
//!
//! Profile documents are flat string field maps stored as Redis hashes, one
//! hash per account keyed by the external account identifier. A full write
//! replaces the document, a merge touches only the named fields; both are
//! single-key operations, so concurrent writers cannot clobber fields they
//! do not name.

use crate::error::{StoreError, StoreResult};
use redis::{AsyncCommands, Client};
use std::collections::HashMap;
use tracing::info;

/// Configuration for the profile document store connection
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
    /// Prefix for document keys (e.g., "users" yields "users:{uid}")
    pub key_prefix: String,
}

impl DocumentStoreConfig {
    /// Create a new DocumentStoreConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PROFILE_STORE_URL`: Redis connection URL (default: "redis://localhost:6379")
    /// - `PROFILE_STORE_KEY_PREFIX`: document key prefix (default: "users")
    pub fn from_env() -> StoreResult<Self> {
        let url = std::env::var("PROFILE_STORE_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let key_prefix =
            std::env::var("PROFILE_STORE_KEY_PREFIX").unwrap_or_else(|_| "users".to_string());

        Ok(DocumentStoreConfig { url, key_prefix })
    }
}

/// Handle to the profile document store
pub struct DocumentStore {
    client: Client,
    key_prefix: String,
}

impl DocumentStore {
    /// Initialize a new document store handle
    pub async fn new(config: &DocumentStoreConfig) -> StoreResult<Self> {
        let client = Client::open(config.url.clone())?;
        info!("Profile store client initialized with URL: {}", config.url);
        Ok(DocumentStore {
            client,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn key(&self, id: &str) -> String {
        format!("{}:{}", self.key_prefix, id)
    }

    /// Get a connection from the client
    async fn get_connection(&self) -> StoreResult<redis::aio::MultiplexedConnection> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    /// Write a full document, replacing any previous contents
    pub async fn put_fields(&self, id: &str, fields: &HashMap<String, String>) -> StoreResult<()> {
        let mut conn = self.get_connection().await?;
        let key = self.key(id);
        let items: Vec<(&String, &String)> = fields.iter().collect();

        // DEL + HSET under MULTI so readers never observe a half-written document
        let _: () = redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .hset_multiple(&key, &items)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    /// Merge the given fields into a document, leaving other fields untouched
    pub async fn merge_fields(
        &self,
        id: &str,
        fields: &HashMap<String, String>,
    ) -> StoreResult<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_connection().await?;
        let key = self.key(id);
        let items: Vec<(&String, &String)> = fields.iter().collect();
        let _: () = conn.hset_multiple(&key, &items).await?;

        Ok(())
    }

    /// Fetch a full document, or None if no document exists for the id
    pub async fn fetch(&self, id: &str) -> StoreResult<Option<HashMap<String, String>>> {
        let mut conn = self.get_connection().await?;
        let fields: HashMap<String, String> = conn.hgetall(self.key(id)).await?;

        if fields.is_empty() {
            Ok(None)
        } else {
            Ok(Some(fields))
        }
    }

    /// Delete a document by id
    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        let mut conn = self.get_connection().await?;
        let _: u64 = conn.del(self.key(id)).await?;
        Ok(())
    }

    /// Check if the profile store is reachable
    pub async fn health_check(&self) -> StoreResult<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(StoreError::Profile)?;
        Ok(pong == "PONG")
    }
}

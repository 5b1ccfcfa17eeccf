//! Store seams for the two external systems behind the user repository
//!
//! The identity service owns credentials and account identifiers; the
//! profile document store owns every other user field. Traits keep the
//! repository testable against in-memory stand-ins.

use async_trait::async_trait;
use common::documents::DocumentStore;
use common::error::StoreResult;
use std::collections::HashMap;

use crate::models::{AccountRecord, AccountUpdate, NewAccount};

pub mod identity;
#[cfg(test)]
pub mod memory;

pub use identity::{HttpIdentityStore, IdentityServiceConfig};

/// Account operations against the external identity service
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn create_account(&self, new_account: &NewAccount) -> StoreResult<AccountRecord>;
    async fn find_by_email(&self, email: &str) -> StoreResult<AccountRecord>;
    async fn find_by_uid(&self, uid: &str) -> StoreResult<AccountRecord>;
    async fn update_account(&self, uid: &str, update: &AccountUpdate)
    -> StoreResult<AccountRecord>;
    async fn delete_account(&self, uid: &str) -> StoreResult<()>;
}

/// Document operations against the external profile store
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn put_fields(&self, uid: &str, fields: &HashMap<String, String>) -> StoreResult<()>;
    async fn merge_fields(&self, uid: &str, fields: &HashMap<String, String>) -> StoreResult<()>;
    async fn fetch(&self, uid: &str) -> StoreResult<Option<HashMap<String, String>>>;
    async fn remove(&self, uid: &str) -> StoreResult<()>;
}

#[async_trait]
impl ProfileStore for DocumentStore {
    async fn put_fields(&self, uid: &str, fields: &HashMap<String, String>) -> StoreResult<()> {
        DocumentStore::put_fields(self, uid, fields).await
    }

    async fn merge_fields(&self, uid: &str, fields: &HashMap<String, String>) -> StoreResult<()> {
        DocumentStore::merge_fields(self, uid, fields).await
    }

    async fn fetch(&self, uid: &str) -> StoreResult<Option<HashMap<String, String>>> {
        DocumentStore::fetch(self, uid).await
    }

    async fn remove(&self, uid: &str) -> StoreResult<()> {
        DocumentStore::remove(self, uid).await
    }
}

//! In-memory store implementations backing the repository tests

use async_trait::async_trait;
use common::error::{StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use super::{IdentityStore, ProfileStore};
use crate::models::{AccountRecord, AccountUpdate, NewAccount};

/// In-memory identity service
#[derive(Default)]
pub struct InMemoryIdentityStore {
    accounts: Mutex<HashMap<String, AccountRecord>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, uid: &str) -> Option<AccountRecord> {
        self.accounts.lock().unwrap().get(uid).cloned()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create_account(&self, new_account: &NewAccount) -> StoreResult<AccountRecord> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.values().any(|a| a.email == new_account.email) {
            return Err(StoreError::Conflict(new_account.email.clone()));
        }

        let record = AccountRecord {
            uid: Uuid::new_v4().simple().to_string(),
            email: new_account.email.clone(),
            display_name: new_account.display_name.clone(),
            phone_number: new_account.phone_number.clone(),
        };
        accounts.insert(record.uid.clone(), record.clone());

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<AccountRecord> {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_uid(&self, uid: &str) -> StoreResult<AccountRecord> {
        self.accounts
            .lock()
            .unwrap()
            .get(uid)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_account(
        &self,
        uid: &str,
        update: &AccountUpdate,
    ) -> StoreResult<AccountRecord> {
        let mut accounts = self.accounts.lock().unwrap();
        let record = accounts.get_mut(uid).ok_or(StoreError::NotFound)?;

        record.email = update.email.clone();
        record.display_name = update.display_name.clone();
        record.phone_number = update.phone_number.clone();

        Ok(record.clone())
    }

    async fn delete_account(&self, uid: &str) -> StoreResult<()> {
        self.accounts
            .lock()
            .unwrap()
            .remove(uid)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// In-memory profile document store with write-failure injection
#[derive(Default)]
pub struct InMemoryProfileStore {
    documents: Mutex<HashMap<String, HashMap<String, String>>>,
    fail_writes: AtomicBool,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail as if the store were unreachable
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn document(&self, uid: &str) -> Option<HashMap<String, String>> {
        self.documents.lock().unwrap().get(uid).cloned()
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "Injected profile store failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn put_fields(&self, uid: &str, fields: &HashMap<String, String>) -> StoreResult<()> {
        self.check_writable()?;
        self.documents
            .lock()
            .unwrap()
            .insert(uid.to_string(), fields.clone());
        Ok(())
    }

    async fn merge_fields(&self, uid: &str, fields: &HashMap<String, String>) -> StoreResult<()> {
        self.check_writable()?;
        let mut documents = self.documents.lock().unwrap();
        let document = documents.entry(uid.to_string()).or_default();
        for (field, value) in fields {
            document.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn fetch(&self, uid: &str) -> StoreResult<Option<HashMap<String, String>>> {
        Ok(self.documents.lock().unwrap().get(uid).cloned())
    }

    async fn remove(&self, uid: &str) -> StoreResult<()> {
        self.documents.lock().unwrap().remove(uid);
        Ok(())
    }
}

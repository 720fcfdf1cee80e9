//! Browser-local keystore.
//!
//! Persists the wallet auth record and function-call key in localStorage so a
//! sign-in survives page reloads.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use gloo_storage::{LocalStorage, Storage as _, errors::StorageError};
use np_storage::{AuthRecord, Keystore};

#[derive(Default)]
pub struct LocalStorageKeystore;

fn auth_key(app_prefix: &str) -> String {
    format!("{app_prefix}_wallet_auth_key")
}

fn function_call_key(account_id: &str) -> String {
    format!("nearplay:key:{account_id}")
}

#[async_trait(?Send)]
impl Keystore for LocalStorageKeystore {
    async fn save_auth_record(&self, app_prefix: &str, record: &AuthRecord) -> Result<()> {
        LocalStorage::set(auth_key(app_prefix), record)
            .map_err(|err| anyhow!("localStorage write: {err}"))
    }

    async fn load_auth_record(&self, app_prefix: &str) -> Result<Option<AuthRecord>> {
        match LocalStorage::get(auth_key(app_prefix)) {
            Ok(record) => Ok(Some(record)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(anyhow!("localStorage read: {err}")),
        }
    }

    async fn save_function_call_key(&self, account_id: &str, key: &str) -> Result<()> {
        LocalStorage::set(function_call_key(account_id), key)
            .map_err(|err| anyhow!("localStorage write: {err}"))
    }

    async fn load_function_call_key(&self, account_id: &str) -> Result<Option<String>> {
        match LocalStorage::get(function_call_key(account_id)) {
            Ok(key) => Ok(Some(key)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(anyhow!("localStorage read: {err}")),
        }
    }
}

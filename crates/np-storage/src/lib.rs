use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Wallet auth record persisted across page loads after a completed sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthRecord {
    pub account_id: String,
    #[serde(default)]
    pub all_keys: Vec<String>,
}

/// Durable store for the wallet session and the function-call key the hosted
/// wallet grants at sign-in. The browser implementation sits on localStorage;
/// tests use [`InMemoryKeystore`].
#[async_trait(?Send)]
pub trait Keystore {
    async fn save_auth_record(&self, app_prefix: &str, record: &AuthRecord) -> Result<()>;
    async fn load_auth_record(&self, app_prefix: &str) -> Result<Option<AuthRecord>>;
    async fn save_function_call_key(&self, account_id: &str, key: &str) -> Result<()>;
    async fn load_function_call_key(&self, account_id: &str) -> Result<Option<String>>;
}

#[derive(Default)]
pub struct InMemoryKeystore {
    records: RwLock<HashMap<String, AuthRecord>>,
    keys: RwLock<HashMap<String, String>>,
}

#[async_trait(?Send)]
impl Keystore for InMemoryKeystore {
    async fn save_auth_record(&self, app_prefix: &str, record: &AuthRecord) -> Result<()> {
        let mut guard = self.records.write().await;
        guard.insert(app_prefix.to_owned(), record.clone());
        Ok(())
    }

    async fn load_auth_record(&self, app_prefix: &str) -> Result<Option<AuthRecord>> {
        let guard = self.records.read().await;
        Ok(guard.get(app_prefix).cloned())
    }

    async fn save_function_call_key(&self, account_id: &str, key: &str) -> Result<()> {
        let mut guard = self.keys.write().await;
        guard.insert(account_id.to_owned(), key.to_owned());
        Ok(())
    }

    async fn load_function_call_key(&self, account_id: &str) -> Result<Option<String>> {
        let guard = self.keys.read().await;
        Ok(guard.get(account_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_auth_record_is_none_not_error() {
        let store = InMemoryKeystore::default();
        assert_eq!(store.load_auth_record("nearplay").await.unwrap(), None);
    }

    #[tokio::test]
    async fn auth_record_is_replaced_wholly_on_save() {
        let store = InMemoryKeystore::default();
        let first = AuthRecord {
            account_id: "alice.testnet".to_owned(),
            all_keys: vec!["ed25519:aaa".to_owned()],
        };
        store.save_auth_record("nearplay", &first).await.unwrap();

        let second = AuthRecord {
            account_id: "bob.testnet".to_owned(),
            all_keys: Vec::new(),
        };
        store.save_auth_record("nearplay", &second).await.unwrap();

        assert_eq!(store.load_auth_record("nearplay").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn function_call_keys_are_scoped_per_account() {
        let store = InMemoryKeystore::default();
        assert_eq!(
            store.load_function_call_key("alice.testnet").await.unwrap(),
            None
        );

        store
            .save_function_call_key("alice.testnet", "ed25519:aaa")
            .await
            .unwrap();

        assert_eq!(
            store.load_function_call_key("alice.testnet").await.unwrap(),
            Some("ed25519:aaa".to_owned())
        );
        assert_eq!(
            store.load_function_call_key("bob.testnet").await.unwrap(),
            None
        );
    }
}

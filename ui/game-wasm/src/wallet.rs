//! Browser wallet connection and the host-page signer hook.

use crate::storage::LocalStorageKeystore;
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use np_api_types::{AccountId, AccountView, NetworkConfig};
use np_chain_client::{FunctionCall, TransactionSigner, WalletConnection};
use np_chain_near::JsonRpcClient;
use np_storage::{AuthRecord, Keystore};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::UrlSearchParams;

/// localStorage prefix for the persisted auth record.
pub const AUTH_PREFIX: &str = "nearplay";

fn js_err(err: JsValue) -> anyhow::Error {
    anyhow!("{err:?}")
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().context("no window")
}

/// Wallet session backed by localStorage and the hosted web wallet.
pub struct BrowserWallet {
    config: NetworkConfig,
    keystore: LocalStorageKeystore,
    auth: Option<AuthRecord>,
    rpc: JsonRpcClient,
}

impl BrowserWallet {
    /// Open the keystore and restore a previously persisted session, if any.
    pub async fn restore(config: NetworkConfig) -> Result<Self> {
        let keystore = LocalStorageKeystore::default();
        let auth = keystore.load_auth_record(AUTH_PREFIX).await?;
        let rpc = JsonRpcClient::new(&config.rpc_url);
        Ok(Self {
            config,
            keystore,
            auth,
            rpc,
        })
    }

    /// Complete a wallet redirect: after sign-in the hosted wallet bounces
    /// back with `account_id` (and the granted keys) in the query string.
    pub async fn complete_sign_in(&mut self) -> Result<()> {
        let search = window()?
            .location()
            .search()
            .map_err(js_err)?;
        if search.is_empty() {
            return Ok(());
        }

        let params = UrlSearchParams::new_with_str(&search).map_err(js_err)?;
        let Some(account_id) = params.get("account_id") else {
            return Ok(());
        };

        let all_keys = params
            .get("all_keys")
            .map(|keys| keys.split(',').map(str::to_owned).collect())
            .unwrap_or_default();
        let record = AuthRecord {
            account_id,
            all_keys,
        };
        self.keystore.save_auth_record(AUTH_PREFIX, &record).await?;

        // The wallet grants a function-call key at sign-in; remember which
        // one so the signer hook can find it after a reload.
        if let Some(public_key) = params.get("public_key") {
            self.keystore
                .save_function_call_key(&record.account_id, &public_key)
                .await?;
        }

        self.auth = Some(record);
        Ok(())
    }
}

#[async_trait(?Send)]
impl WalletConnection for BrowserWallet {
    fn account_id(&self) -> Option<AccountId> {
        self.auth
            .as_ref()
            .map(|record| AccountId(record.account_id.clone()))
    }

    async fn account_state(&self, account_id: &AccountId) -> Result<AccountView> {
        self.rpc.view_account(account_id).await
    }

    async fn request_sign_in(&self, contract_id: &AccountId, app_title: &str) -> Result<()> {
        let window = window()?;
        let current = window.location().href().map_err(js_err)?;

        let login_url = format!(
            "{}/login/?success_url={}&failure_url={}&contract_id={}&title={}",
            self.config.wallet_url,
            js_sys::encode_uri_component(&current),
            js_sys::encode_uri_component(&current),
            js_sys::encode_uri_component(&contract_id.0),
            js_sys::encode_uri_component(app_title),
        );

        window.location().set_href(&login_url).map_err(js_err)
    }
}

/// Signer that delegates to the host page's SDK hook:
/// `window.nearSigner.signFunctionCall(json) -> Promise<string>`.
///
/// Key material and transaction serialization stay inside the SDK boundary;
/// this type only marshals the call across it, naming the signing account and
/// the function-call key persisted at sign-in.
#[derive(Default)]
pub struct HostSigner {
    keystore: LocalStorageKeystore,
}

#[async_trait(?Send)]
impl TransactionSigner for HostSigner {
    async fn sign_function_call(&self, call: &FunctionCall) -> Result<String> {
        let auth = self.keystore.load_auth_record(AUTH_PREFIX).await?;
        let signer_id = auth.map(|record| record.account_id);
        let public_key = match &signer_id {
            Some(account_id) => self.keystore.load_function_call_key(account_id).await?,
            None => None,
        };

        let window = window()?;
        let hook = js_sys::Reflect::get(&window, &JsValue::from_str("nearSigner"))
            .map_err(js_err)?;
        if hook.is_undefined() || hook.is_null() {
            bail!("host signer hook missing (window.nearSigner)");
        }

        let sign_fn = js_sys::Reflect::get(&hook, &JsValue::from_str("signFunctionCall"))
            .map_err(js_err)?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| anyhow!("nearSigner.signFunctionCall is not a function"))?;

        let payload = serde_json::json!({
            "signerId": signer_id,
            "publicKey": public_key,
            "receiverId": call.receiver_id.0,
            "methodName": call.method_name,
            "args": call.args,
            "gas": call.gas.to_string(),
            "deposit": call.deposit.to_string(),
        });

        let promise = sign_fn
            .call1(&hook, &JsValue::from_str(&payload.to_string()))
            .map_err(js_err)?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| anyhow!("signFunctionCall did not return a Promise"))?;

        let signed = JsFuture::from(promise).await.map_err(js_err)?;
        signed
            .as_string()
            .context("signer returned a non-string value")
    }
}

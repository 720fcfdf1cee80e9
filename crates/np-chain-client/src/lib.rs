//! Capability seams over the chain SDK surface.
//!
//! The bridge only ever touches these traits, so it can run against the real
//! RPC/wallet stack or against in-memory fakes in tests. All traits are
//! `?Send`: every implementation runs on the browser's single-threaded event
//! loop.

use anyhow::Result;
use async_trait::async_trait;
use np_api_types::{AccountId, AccountView};
use serde_json::Value;

/// One contract function call, as handed to the signer seam.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub receiver_id: AccountId,
    pub method_name: String,
    pub args: Value,
    pub gas: u64,
    pub deposit: u128,
}

/// Authenticated (or anonymous) wallet session and its sign-in flow.
#[async_trait(?Send)]
pub trait WalletConnection {
    /// Account id restored from the persisted auth record, if any.
    fn account_id(&self) -> Option<AccountId>;

    async fn account_state(&self, account_id: &AccountId) -> Result<AccountView>;

    /// Start the hosted-wallet sign-in flow for `contract_id`.
    async fn request_sign_in(&self, contract_id: &AccountId, app_title: &str) -> Result<()>;
}

/// Handle bound to one contract address: a read-only view call and a
/// state-mutating change call.
#[async_trait(?Send)]
pub trait ContractClient {
    fn contract_id(&self) -> &AccountId;

    async fn view_call(&self, method_name: &str, args: Value) -> Result<Value>;

    async fn change_call(
        &self,
        method_name: &str,
        args: Value,
        gas: u64,
        deposit: u128,
    ) -> Result<Value>;
}

/// Produces a signed, base64-encoded transaction for one function call.
///
/// Key material and transaction serialization live entirely behind this seam.
#[async_trait(?Send)]
pub trait TransactionSigner {
    async fn sign_function_call(&self, call: &FunctionCall) -> Result<String>;
}

//! NEAR JSON-RPC transport and the contract handle built on it.
//!
//! View calls go straight to the RPC node. Change calls are signed behind the
//! [`TransactionSigner`] seam and broadcast with `broadcast_tx_commit`.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use np_api_types::{AccountId, AccountView};
use np_chain_client::{ContractClient, FunctionCall, TransactionSigner};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

pub struct JsonRpcClient {
    endpoint: String,
    http: reqwest::Client,
}

// ── JSON-RPC wire types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CallFunctionResult {
    result: Vec<u8>,
    #[serde(default)]
    logs: Vec<String>,
}

impl JsonRpcClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "nearplay",
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("near rpc transport")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("near rpc HTTP {status}: {text}");
        }

        let envelope: RpcEnvelope = response.json().await.context("near rpc parse")?;
        envelope_result(envelope)
    }

    async fn query(&self, params: Value) -> Result<Value> {
        self.call("query", params).await
    }

    pub async fn view_account(&self, account_id: &AccountId) -> Result<AccountView> {
        let result = self
            .query(json!({
                "request_type": "view_account",
                "finality": "final",
                "account_id": account_id.0,
            }))
            .await?;

        serde_json::from_value(result).context("view_account decode")
    }

    pub async fn call_function(
        &self,
        contract_id: &AccountId,
        method_name: &str,
        args: &Value,
    ) -> Result<Value> {
        let result = self
            .query(json!({
                "request_type": "call_function",
                "finality": "final",
                "account_id": contract_id.0,
                "method_name": method_name,
                "args_base64": STANDARD.encode(args.to_string()),
            }))
            .await?;

        let call: CallFunctionResult =
            serde_json::from_value(result).context("call_function decode")?;
        for log in &call.logs {
            debug!(contract = %contract_id, method = method_name, "{log}");
        }
        decode_result_bytes(&call.result)
    }

    pub async fn broadcast_tx(&self, signed_tx_base64: &str) -> Result<Value> {
        self.call("broadcast_tx_commit", json!([signed_tx_base64]))
            .await
    }
}

fn envelope_result(envelope: RpcEnvelope) -> Result<Value> {
    if let Some(err) = envelope.error {
        match err.data {
            Some(data) => bail!("near rpc error: {} ({data})", err.message),
            None => bail!("near rpc error: {}", err.message),
        }
    }
    envelope
        .result
        .ok_or_else(|| anyhow::anyhow!("near rpc response had neither result nor error"))
}

/// A `call_function` result is raw bytes holding the method's JSON return
/// value. Methods returning nothing map to null.
fn decode_result_bytes(bytes: &[u8]) -> Result<Value> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).context("call_function result decode")
}

/// Contract handle bound to one address. Immutable after construction.
pub struct RpcContract<S> {
    client: JsonRpcClient,
    contract_id: AccountId,
    signer: S,
}

impl<S> RpcContract<S> {
    pub fn new(client: JsonRpcClient, contract_id: AccountId, signer: S) -> Self {
        Self {
            client,
            contract_id,
            signer,
        }
    }
}

#[async_trait(?Send)]
impl<S: TransactionSigner> ContractClient for RpcContract<S> {
    fn contract_id(&self) -> &AccountId {
        &self.contract_id
    }

    async fn view_call(&self, method_name: &str, args: Value) -> Result<Value> {
        self.client
            .call_function(&self.contract_id, method_name, &args)
            .await
    }

    async fn change_call(
        &self,
        method_name: &str,
        args: Value,
        gas: u64,
        deposit: u128,
    ) -> Result<Value> {
        let call = FunctionCall {
            receiver_id: self.contract_id.clone(),
            method_name: method_name.to_owned(),
            args,
            gas,
            deposit,
        };
        let signed = self
            .signer
            .sign_function_call(&call)
            .await
            .context("sign function call")?;
        self.client.broadcast_tx(&signed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_function_result_bytes_decode_as_json() {
        // "\"1500000\"" as the contract would return a U128 balance
        let bytes = b"\"1500000\"";
        assert_eq!(decode_result_bytes(bytes).unwrap(), json!("1500000"));
    }

    #[test]
    fn empty_result_bytes_decode_as_null() {
        assert_eq!(decode_result_bytes(&[]).unwrap(), Value::Null);
    }

    #[test]
    fn rpc_error_envelope_maps_to_error() {
        let envelope: RpcEnvelope = serde_json::from_value(json!({
            "error": {"message": "account does not exist", "data": "alice.testnet"}
        }))
        .unwrap();
        let err = envelope_result(envelope).unwrap_err();
        assert!(err.to_string().contains("account does not exist"));
    }

    #[test]
    fn envelope_without_result_or_error_is_rejected() {
        let envelope = RpcEnvelope {
            result: None,
            error: None,
        };
        assert!(envelope_result(envelope).is_err());
    }
}

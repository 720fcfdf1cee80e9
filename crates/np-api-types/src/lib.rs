use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed contract the bridge talks to. One contract, two methods.
pub const CONTRACT_ID: &str = "dev-1631277489384-75412609538902";

/// Display name shown by the hosted wallet during sign-in.
pub const APP_TITLE: &str = "Near Unity Example";

pub const FT_BALANCE_OF: &str = "ft_balance_of";
pub const FT_TRANSFER: &str = "ft_transfer";

/// Gas attached to every `ft_transfer` change call.
pub const FT_TRANSFER_GAS: u64 = 50_000_000_000_000;

/// One yocto, attached to every `ft_transfer` per NEP-141 convention.
pub const FT_TRANSFER_DEPOSIT: u128 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AccountId(pub String);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Endpoints for one NEAR network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_id: String,
    pub rpc_url: String,
    pub wallet_url: String,
    pub helper_url: String,
}

impl NetworkConfig {
    pub fn testnet() -> Self {
        Self {
            network_id: "testnet".to_owned(),
            rpc_url: "https://rpc.testnet.near.org".to_owned(),
            wallet_url: "https://wallet.testnet.near.org".to_owned(),
            helper_url: "https://helper.testnet.near.org".to_owned(),
        }
    }
}

/// Account restored from a persisted wallet session at bootstrap.
///
/// `native_balance` is the account's native token amount (yoctoNEAR, as the
/// RPC returns it), not the contract's fungible-token balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountDescriptor {
    pub account_id: AccountId,
    pub native_balance: String,
}

/// Subset of the RPC `view_account` result the bridge reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    pub amount: String,
}

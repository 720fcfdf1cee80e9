//! Session bootstrap: restore the persisted account and assemble the handles
//! the bridge handlers call into.

use anyhow::{Context, Result};
use np_api_types::AccountDescriptor;
use np_chain_client::{ContractClient, WalletConnection};

pub struct Session<W, C> {
    /// Restored account, absent when no sign-in was persisted.
    pub account: Option<AccountDescriptor>,
    pub wallet: W,
    pub contract: C,
}

impl<W: WalletConnection, C: ContractClient> Session<W, C> {
    /// Restore the account descriptor (absence is not an error) and take
    /// ownership of the wallet and contract handles. Any failure aborts the
    /// whole bootstrap; callers must not assume partial results.
    pub async fn establish(wallet: W, contract: C) -> Result<Self> {
        let account = match wallet.account_id() {
            Some(account_id) => {
                let state = wallet
                    .account_state(&account_id)
                    .await
                    .context("bootstrap account state")?;
                Some(AccountDescriptor {
                    account_id,
                    native_balance: state.amount,
                })
            }
            None => None,
        };

        Ok(Session {
            account,
            wallet,
            contract,
        })
    }
}

//! The bridge proper: a two-phase state machine over the engine's message
//! stream.
//!
//! Phases: `Uninitialized` (bootstrap still running, session-dependent
//! messages queue up) and `Ready` (handles attached, messages dispatch
//! immediately). One uniform queue-until-ready policy covers login, transfer
//! and balance alike; lifecycle messages never wait.

use crate::message::EngineMessage;
use crate::session::Session;
use crate::ui::UiState;
use anyhow::{Context, Result};
use np_api_types::{
    APP_TITLE, AccountDescriptor, FT_BALANCE_OF, FT_TRANSFER, FT_TRANSFER_DEPOSIT, FT_TRANSFER_GAS,
};
use np_chain_client::{ContractClient, WalletConnection};
use serde_json::{Value, json};
use std::collections::VecDeque;
use tracing::warn;

enum Phase<W, C> {
    Uninitialized { queued: VecDeque<EngineMessage> },
    Ready(Session<W, C>),
}

/// An owned bridge instance. Whatever owns the engine's lifecycle constructs
/// one, feeds it decoded messages, and drops it on teardown — there is no
/// process-wide registry for instances to collide on.
pub struct Bridge<W, C> {
    phase: Phase<W, C>,
    ui: UiState,
}

impl<W: WalletConnection, C: ContractClient> Bridge<W, C> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized {
                queued: VecDeque::new(),
            },
            ui: UiState::default(),
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    /// Account restored at bootstrap, once the session is attached.
    pub fn session_account(&self) -> Option<&AccountDescriptor> {
        match &self.phase {
            Phase::Ready(session) => session.account.as_ref(),
            Phase::Uninitialized { .. } => None,
        }
    }

    /// Messages waiting for the session to attach.
    pub fn pending(&self) -> usize {
        match &self.phase {
            Phase::Uninitialized { queued } => queued.len(),
            Phase::Ready(_) => 0,
        }
    }

    /// Attach the bootstrapped session and drain queued messages in arrival
    /// order.
    pub async fn attach_session(&mut self, session: Session<W, C>) -> Result<()> {
        let queued = match &mut self.phase {
            Phase::Uninitialized { queued } => std::mem::take(queued),
            Phase::Ready(_) => VecDeque::new(),
        };
        self.phase = Phase::Ready(session);

        for message in queued {
            self.dispatch(message).await?;
        }
        Ok(())
    }

    /// Handle one inbound engine message.
    ///
    /// Transfer and login failures propagate to the caller. Balance failures
    /// leave the displayed balance unchanged and are only logged.
    pub async fn handle(&mut self, message: EngineMessage) -> Result<()> {
        if message.needs_session() {
            if let Phase::Uninitialized { queued } = &mut self.phase {
                queued.push_back(message);
                return Ok(());
            }
        }
        self.dispatch(message).await
    }

    async fn dispatch(&mut self, message: EngineMessage) -> Result<()> {
        match message {
            EngineMessage::LoadProgress(fraction) => {
                self.ui.progress = fraction;
            }
            EngineMessage::LoadCompleted => {
                self.ui.loaded = true;
            }
            EngineMessage::LoginRequested => {
                let Phase::Ready(session) = &self.phase else {
                    return Ok(());
                };
                session
                    .wallet
                    .request_sign_in(session.contract.contract_id(), APP_TITLE)
                    .await
                    .context("wallet sign-in")?;
            }
            EngineMessage::TransferRequested {
                receiver_id,
                amount,
            } => {
                let Phase::Ready(session) = &self.phase else {
                    return Ok(());
                };
                session
                    .contract
                    .change_call(
                        FT_TRANSFER,
                        json!({ "receiver_id": receiver_id, "amount": amount }),
                        FT_TRANSFER_GAS,
                        FT_TRANSFER_DEPOSIT,
                    )
                    .await
                    .context("ft_transfer")?;
            }
            EngineMessage::BalanceRequested { account_id } => {
                let Phase::Ready(session) = &self.phase else {
                    return Ok(());
                };
                match session
                    .contract
                    .view_call(FT_BALANCE_OF, json!({ "account_id": account_id }))
                    .await
                {
                    Ok(value) => match numeric(&value) {
                        Some(balance) => self.ui.balance = balance,
                        None => {
                            warn!("ft_balance_of returned non-numeric {value}, balance unchanged")
                        }
                    },
                    Err(err) => warn!("ft_balance_of failed, balance unchanged: {err:#}"),
                }
            }
        }
        Ok(())
    }
}

impl<W: WalletConnection, C: ContractClient> Default for Bridge<W, C> {
    fn default() -> Self {
        Self::new()
    }
}

// ft_balance_of returns a stringified U128; tolerate plain numbers too.
// Stored identically, no decimal scaling. Anything else is not a balance.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

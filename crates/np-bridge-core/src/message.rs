//! Wire names and decoding for inbound engine messages.

use anyhow::{Result, bail};
use serde_json::Value;

pub const MSG_LOGIN: &str = "NearLogin";
pub const MSG_TRANSFER: &str = "FtTransfer";
pub const MSG_BALANCE: &str = "FtBalanceOf";
pub const MSG_CANVAS: &str = "canvas";
pub const MSG_PROGRESS: &str = "progress";
pub const MSG_LOADED: &str = "loaded";

/// One inbound engine message, decoded from its wire name and positional
/// arguments.
///
/// `canvas` has no variant: it carries a DOM handle and is handled entirely
/// in the front-end layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    LoginRequested,
    TransferRequested { receiver_id: String, amount: String },
    BalanceRequested { account_id: String },
    LoadProgress(f64),
    LoadCompleted,
}

impl EngineMessage {
    pub fn from_wire(name: &str, args: &[Value]) -> Result<EngineMessage> {
        match name {
            MSG_LOGIN => Ok(Self::LoginRequested),
            MSG_TRANSFER => Ok(Self::TransferRequested {
                receiver_id: arg_str(args, 0, name)?,
                amount: arg_str(args, 1, name)?,
            }),
            MSG_BALANCE => Ok(Self::BalanceRequested {
                account_id: arg_str(args, 0, name)?,
            }),
            MSG_PROGRESS => {
                let fraction = args.first().and_then(Value::as_f64).unwrap_or(0.0);
                Ok(Self::LoadProgress(fraction))
            }
            MSG_LOADED => Ok(Self::LoadCompleted),
            other => bail!("unknown engine message: {other}"),
        }
    }

    /// True when handling needs the wallet/contract handles.
    pub fn needs_session(&self) -> bool {
        matches!(
            self,
            Self::LoginRequested | Self::TransferRequested { .. } | Self::BalanceRequested { .. }
        )
    }
}

// The engine serializes args loosely; amounts sometimes arrive as numbers.
fn arg_str(args: &[Value], index: usize, name: &str) -> Result<String> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => bail!("{name}: argument {index} has unexpected type: {other}"),
        None => bail!("{name}: missing argument {index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transfer_decodes_positional_args() {
        let msg = EngineMessage::from_wire(MSG_TRANSFER, &[json!("bob.testnet"), json!("25")])
            .unwrap();
        assert_eq!(
            msg,
            EngineMessage::TransferRequested {
                receiver_id: "bob.testnet".to_owned(),
                amount: "25".to_owned(),
            }
        );
    }

    #[test]
    fn numeric_amounts_keep_their_literal_text() {
        let msg = EngineMessage::from_wire(MSG_TRANSFER, &[json!("bob.testnet"), json!(25)])
            .unwrap();
        assert_eq!(
            msg,
            EngineMessage::TransferRequested {
                receiver_id: "bob.testnet".to_owned(),
                amount: "25".to_owned(),
            }
        );
    }

    #[test]
    fn transfer_with_missing_amount_is_rejected() {
        assert!(EngineMessage::from_wire(MSG_TRANSFER, &[json!("bob.testnet")]).is_err());
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(EngineMessage::from_wire("Teleport", &[]).is_err());
    }

    #[test]
    fn lifecycle_messages_do_not_need_the_session() {
        assert!(!EngineMessage::LoadProgress(0.5).needs_session());
        assert!(!EngineMessage::LoadCompleted.needs_session());
        assert!(EngineMessage::LoginRequested.needs_session());
    }
}

//! Engine↔chain event bridge.
//!
//! The embedded engine posts named messages with positional arguments; each
//! message kind triggers exactly one SDK call through the capability traits
//! in `np-chain-client`. No browser dependencies here: the wasm front-end
//! feeds decoded messages in and syncs the DOM from [`ui::UiState`] afterward.

pub mod bridge;
pub mod message;
pub mod session;
pub mod ui;

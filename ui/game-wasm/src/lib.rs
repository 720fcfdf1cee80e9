//! NearPlay WASM front-end.
//!
//! Embeds a WebGL game and bridges its message channel to the NEAR wallet and
//! a fungible-token contract. The bridge state machine lives in
//! `np-bridge-core`; this crate owns the DOM, the engine channel, and the
//! concrete wallet/contract wiring.

pub mod channel;
pub mod dom;
pub mod events;
pub mod render;
pub mod storage;
pub mod wallet;

use channel::EngineChannel;
use gloo_console::error;
use np_api_types::{AccountId, CONTRACT_ID, NetworkConfig};
use np_bridge_core::bridge::Bridge;
use np_bridge_core::session::Session;
use np_chain_near::{JsonRpcClient, RpcContract};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::Mutex;
use wallet::{BrowserWallet, HostSigner};
use wasm_bindgen::prelude::*;

type GameBridge = Bridge<BrowserWallet, RpcContract<HostSigner>>;

/// The bridge shared between event handlers. The async mutex serializes
/// handler bodies across await points.
pub type SharedBridge = Rc<Mutex<GameBridge>>;

thread_local! {
    // Owned channel kept alive for the page session; `teardown` drops it.
    static CHANNEL: RefCell<Option<EngineChannel>> = const { RefCell::new(None) };
}

/// WASM entry point — called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let bridge: SharedBridge = Rc::new(Mutex::new(Bridge::new()));

    // Handlers first: messages arriving before bootstrap completes queue
    // inside the bridge and flush when the session attaches.
    let mut channel = EngineChannel::new(els.engine_container.clone().into());
    events::bind_engine_events(&mut channel, bridge.clone(), &els)?;
    events::bind_toggle(bridge.clone(), &els);
    CHANNEL.with(|slot| *slot.borrow_mut() = Some(channel));

    events::initial_render(&els);

    let session = bootstrap(NetworkConfig::testnet()).await.map_err(|err| {
        error!(format!("bootstrap failed: {err:#}"));
        JsValue::from_str(&format!("bootstrap failed: {err:#}"))
    })?;

    let mut guard = bridge.lock().await;
    if let Err(err) = guard.attach_session(session).await {
        error!(format!("queued message failed: {err:#}"));
    }
    render::sync(&els, guard.ui(), guard.session_account());

    Ok(())
}

/// Bootstrap sequence: keystore → wallet session → contract handle. Any
/// failure aborts the whole thing; no retry, no partial results.
async fn bootstrap(
    config: NetworkConfig,
) -> anyhow::Result<Session<BrowserWallet, RpcContract<HostSigner>>> {
    let mut wallet = BrowserWallet::restore(config.clone()).await?;
    wallet.complete_sign_in().await?;

    let contract = RpcContract::new(
        JsonRpcClient::new(&config.rpc_url),
        AccountId(CONTRACT_ID.to_owned()),
        HostSigner::default(),
    );

    Session::establish(wallet, contract).await
}

/// Host-page teardown hook: drops the channel, which removes every registered
/// engine handler. In-flight SDK calls are not cancelled; their results are
/// simply never delivered.
#[wasm_bindgen]
pub fn teardown() {
    CHANNEL.with(|slot| {
        slot.borrow_mut().take();
    });
}

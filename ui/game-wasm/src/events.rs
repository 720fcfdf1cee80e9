//! Event wiring: engine messages into the bridge, UI clicks into view state.
//!
//! Handlers run behind an async mutex, so a handler suspended on an SDK call
//! never interleaves with another — later messages wait their turn, matching
//! the single-threaded dispatch the bridge assumes.

use crate::SharedBridge;
use crate::channel::{self, EngineChannel};
use crate::dom::Elements;
use crate::render;
use gloo_console::{error, warn};
use np_bridge_core::message::{
    EngineMessage, MSG_BALANCE, MSG_CANVAS, MSG_LOADED, MSG_LOGIN, MSG_PROGRESS, MSG_TRANSFER,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::CustomEvent;

/// Register a handler for every engine message.
pub fn bind_engine_events(
    channel: &mut EngineChannel,
    bridge: SharedBridge,
    els: &Elements,
) -> Result<(), JsValue> {
    // canvas carries a DOM handle and never reaches the bridge
    channel.on(MSG_CANVAS, move |event: CustomEvent| {
        if let Ok(canvas) = event.detail().dyn_into::<web_sys::Element>() {
            let _ = canvas.set_attribute("role", "unityCanvas");
        }
    })?;

    for name in [MSG_LOGIN, MSG_TRANSFER, MSG_BALANCE, MSG_PROGRESS, MSG_LOADED] {
        let bridge = bridge.clone();
        let els = els.clone();
        channel.on(name, move |event: CustomEvent| {
            let args = channel::event_args(&event);
            let message = match EngineMessage::from_wire(name, &args) {
                Ok(message) => message,
                Err(err) => {
                    warn!(format!("dropping malformed engine message: {err:#}"));
                    return;
                }
            };

            let bridge = bridge.clone();
            let els = els.clone();
            spawn_local(async move {
                let mut guard = bridge.lock().await;
                if let Err(err) = guard.handle(message).await {
                    error!(format!("engine message failed: {err:#}"));
                }
                render::sync(&els, guard.ui(), guard.session_account());
            });
        })?;
    }

    Ok(())
}

/// Wire the (un)mount toggle button. The click handler lives for the whole
/// page session.
pub fn bind_toggle(bridge: SharedBridge, els: &Elements) {
    let els2 = els.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let bridge = bridge.clone();
        let els = els2.clone();
        spawn_local(async move {
            let mut guard = bridge.lock().await;
            guard.ui_mut().toggle_mounted();
            render::sync(&els, guard.ui(), guard.session_account());
        });
    }) as Box<dyn FnMut(_)>);
    let _ = els
        .toggle_btn
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
    cb.forget();
}

/// Paint the initial state before bootstrap completes.
pub fn initial_render(els: &Elements) {
    render::sync(els, &np_bridge_core::ui::UiState::default(), None);
}

#![cfg(target_arch = "wasm32")]

use game_wasm::channel::EngineChannel;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_test::*;
use web_sys::{CustomEvent, EventTarget};

wasm_bindgen_test_configure!(run_in_browser);

fn dispatch(target: &EventTarget, name: &str) {
    let event = CustomEvent::new(name).unwrap();
    target.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn unbind_leaves_zero_registered_handlers() {
    let target = EventTarget::new().unwrap();
    let mut channel = EngineChannel::new(target.clone());

    let fired = Rc::new(Cell::new(0u32));
    for name in ["progress", "loaded"] {
        let fired = fired.clone();
        channel
            .on(name, move |_| fired.set(fired.get() + 1))
            .unwrap();
    }
    assert_eq!(channel.handler_count(), 2);

    dispatch(&target, "progress");
    assert_eq!(fired.get(), 1);

    channel.unbind();
    assert_eq!(channel.handler_count(), 0);

    // Removed handlers never fire again, even though the target lives on.
    dispatch(&target, "progress");
    dispatch(&target, "loaded");
    assert_eq!(fired.get(), 1);
}

#[wasm_bindgen_test]
fn dropping_the_channel_unbinds_too() {
    let target = EventTarget::new().unwrap();
    let fired = Rc::new(Cell::new(0u32));

    {
        let mut channel = EngineChannel::new(target.clone());
        let fired = fired.clone();
        channel
            .on("loaded", move |_| fired.set(fired.get() + 1))
            .unwrap();
        dispatch(&target, "loaded");
    }

    dispatch(&target, "loaded");
    assert_eq!(fired.get(), 1);
}

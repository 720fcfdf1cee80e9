//! Engine message channel.
//!
//! The embedded engine's loader posts named `CustomEvent`s on the engine
//! container, with positional arguments in `detail`. Each binding retains its
//! closure so `unbind` can remove every handler in one scoped cleanup — no
//! handler fires after teardown, even though the engine keeps running.

use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, EventTarget};

struct Binding {
    name: &'static str,
    callback: Closure<dyn FnMut(CustomEvent)>,
}

pub struct EngineChannel {
    target: EventTarget,
    bindings: Vec<Binding>,
}

impl EngineChannel {
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            bindings: Vec::new(),
        }
    }

    pub fn on<F>(&mut self, name: &'static str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(CustomEvent) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
        self.target
            .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?;
        self.bindings.push(Binding { name, callback });
        Ok(())
    }

    /// Remove every registered handler in one pass.
    pub fn unbind(&mut self) {
        for binding in self.bindings.drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(
                    binding.name,
                    binding.callback.as_ref().unchecked_ref(),
                );
        }
    }

    pub fn handler_count(&self) -> usize {
        self.bindings.len()
    }
}

impl Drop for EngineChannel {
    fn drop(&mut self) {
        self.unbind();
    }
}

/// Positional arguments from a `CustomEvent` detail payload.
pub fn event_args(event: &CustomEvent) -> Vec<Value> {
    serde_wasm_bindgen::from_value(event.detail()).unwrap_or_default()
}

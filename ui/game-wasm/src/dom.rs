//! DOM element bindings.
//!
//! All references are resolved once at startup. To add new UI elements, add a
//! field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

// ── Elements struct ──

/// All DOM element references the page uses.
/// Clone-friendly (inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    /// Container the engine renders into; also the engine's message target.
    pub engine_container: Element,
    pub toggle_btn: HtmlElement,
    pub loading_overlay: Element,
    pub progress_fill: HtmlElement,
    pub account_line: Element,
    pub balance_line: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            engine_container: get_el!("engineContainer"),
            toggle_btn: get_html!("toggleEngineBtn"),
            loading_overlay: get_el!("loadingOverlay"),
            progress_fill: get_html!("progressBarFill"),
            account_line: get_el!("accountLine"),
            balance_line: get_el!("balanceLine"),
        })
    }
}

//! Syncs [`UiState`] to the DOM after every handled message.

use crate::dom::{self, Elements};
use np_api_types::AccountDescriptor;
use np_bridge_core::ui::UiState;

pub fn sync(els: &Elements, ui: &UiState, account: Option<&AccountDescriptor>) {
    dom::toggle_class(&els.engine_container, "hidden", !ui.engine_mounted);

    // The loading overlay covers the engine until the runtime reports loaded.
    dom::toggle_class(&els.loading_overlay, "hidden", ui.loaded);
    let _ = els
        .progress_fill
        .style()
        .set_property("width", &ui.progress_width());

    match account {
        Some(account) if ui.engine_mounted => {
            dom::set_text(&els.account_line, &format!("AccountId: {}", account.account_id));
            dom::toggle_class(&els.account_line, "hidden", false);
        }
        _ => dom::toggle_class(&els.account_line, "hidden", true),
    }

    if ui.engine_mounted && ui.balance_visible() {
        dom::set_text(&els.balance_line, &format!("Balance: {}", ui.balance));
        dom::toggle_class(&els.balance_line, "hidden", false);
    } else {
        dom::toggle_class(&els.balance_line, "hidden", true);
    }
}

//! Front-end view state.
//!
//! Four independent fields, each written by exactly one handler family. The
//! render path derives everything it draws from here.

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub engine_mounted: bool,
    pub loaded: bool,
    /// Engine load progress, a fraction in [0, 1].
    pub progress: f64,
    /// Fungible-token balance, stored exactly as the view call returned it.
    pub balance: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            engine_mounted: true,
            loaded: false,
            progress: 0.0,
            balance: 0.0,
        }
    }
}

impl UiState {
    /// CSS width of the progress bar fill.
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress * 100.0)
    }

    /// The balance line renders only once a nonzero balance arrived.
    pub fn balance_visible(&self) -> bool {
        self.balance != 0.0
    }

    /// Toggle the engine view. Leaving the loaded state first ensures a
    /// remount shows the loading overlay again.
    pub fn toggle_mounted(&mut self) {
        if self.loaded {
            self.loaded = false;
        }
        self.engine_mounted = !self.engine_mounted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_width_is_fraction_times_hundred() {
        let mut ui = UiState::default();
        ui.progress = 0.5;
        assert_eq!(ui.progress_width(), "50%");
        ui.progress = 0.0;
        assert_eq!(ui.progress_width(), "0%");
        ui.progress = 1.0;
        assert_eq!(ui.progress_width(), "100%");
    }

    #[test]
    fn zero_balance_hides_the_line_and_any_nonzero_shows_it() {
        let mut ui = UiState::default();
        assert!(!ui.balance_visible());
        ui.balance = 0.0001;
        assert!(ui.balance_visible());
    }

    #[test]
    fn unmount_resets_loaded_before_remount() {
        let mut ui = UiState::default();
        ui.loaded = true;

        ui.toggle_mounted();
        assert!(!ui.engine_mounted);
        assert!(!ui.loaded);

        ui.toggle_mounted();
        assert!(ui.engine_mounted);
        assert!(!ui.loaded);
    }
}

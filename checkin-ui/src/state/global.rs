//! Global Application State
//!
//! Reactive state shared by the layout and the pages, using Leptos signals.

use checkin_admin::{DashboardState, User};
use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Dashboard view state; the header reads the signed-in user from it
    pub dashboard: RwSignal<DashboardState>,
    /// Error message (for toasts)
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        dashboard: create_rw_signal(DashboardState::new()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

/// Global state from context
pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// Signed-in administrator, if known
    pub fn user(&self) -> Option<User> {
        self.dashboard.with(|d| d.user.clone())
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

//! Global Application State
//!
//! Reactive state of the weight form using Leptos signals.

use leptos::*;

use crate::state::form::{Backdrop, WeightEntry};

/// Comparison notification lifetime
const NOTIFICATION_MS: u32 = 3000;
const SUCCESS_MS: u32 = 3000;
const ERROR_MS: u32 = 5000;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Current text in the weight input
    pub input: RwSignal<String>,
    /// Cached entries, replaced wholesale after every successful append
    pub entries: RwSignal<Vec<WeightEntry>>,
    /// An append is in flight
    pub in_flight: RwSignal<bool>,
    pub history_visible: RwSignal<bool>,
    pub backdrop: RwSignal<Backdrop>,
    /// Comparison notification text
    pub notification: RwSignal<Option<String>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    notification_gen: StoredValue<u64>,
    error_gen: StoredValue<u64>,
    success_gen: StoredValue<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        input: create_rw_signal(String::new()),
        entries: create_rw_signal(Vec::new()),
        in_flight: create_rw_signal(false),
        history_visible: create_rw_signal(false),
        backdrop: create_rw_signal(Backdrop::default()),
        notification: create_rw_signal(None),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        notification_gen: store_value(0),
        error_gen: store_value(0),
        success_gen: store_value(0),
    };

    provide_context(state);
}

/// Set `signal` and clear it after `ms`, unless it was set again meanwhile
fn show_timed(
    signal: RwSignal<Option<String>>,
    generation: StoredValue<u64>,
    message: &str,
    ms: u32,
) {
    generation.update_value(|g| *g += 1);
    let armed = generation.get_value();
    signal.set(Some(message.to_string()));

    gloo_timers::callback::Timeout::new(ms, move || {
        if generation.get_value() == armed {
            signal.set(None);
        }
    })
    .forget();
}

impl GlobalState {
    /// Show the comparison notification (auto-clears after 3s)
    pub fn show_notification(&self, message: &str) {
        show_timed(self.notification, self.notification_gen, message, NOTIFICATION_MS);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        show_timed(self.success, self.success_gen, message, SUCCESS_MS);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        show_timed(self.error, self.error_gen, message, ERROR_MS);
    }

    pub fn toggle_history(&self) {
        self.history_visible.update(|v| *v = !*v);
    }

    pub fn close_history(&self) {
        self.history_visible.set(false);
    }
}

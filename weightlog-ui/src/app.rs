//! App Root Component

use leptos::*;

use crate::api;
use crate::components::{HistoryButton, HistoryPanel, Toast, WeightForm};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Initial load; a failure only leaves the history empty
    let entries = state.entries;
    spawn_local(async move {
        match api::fetch_entries().await {
            Ok(list) => entries.set(list),
            Err(e) => web_sys::console::error_1(&format!("Failed to fetch entries: {}", e).into()),
        }
    });

    let backdrop = state.backdrop;

    view! {
        <div class=move || format!(
            "min-h-screen bg-gradient-to-b {} text-white flex flex-col items-center \
             justify-center transition-colors duration-500",
            backdrop.get().gradient()
        )>
            <h1 class="text-4xl font-bold mb-8">"Weightlog"</h1>

            <WeightForm />

            <HistoryButton />
            <HistoryPanel />

            <Toast />
        </div>
    }
}

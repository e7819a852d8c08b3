//! Weight Form Component
//!
//! Number input plus submit button. Submitting stores today's weight and
//! reacts to the comparison the server returns.

use leptos::*;

use crate::api;
use crate::state::form::{
    parse_weight, reaction, INVALID_WEIGHT_MESSAGE, SAVED_MESSAGE, SAVE_FAILED_MESSAGE,
};
use crate::state::global::GlobalState;

#[component]
pub fn WeightForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let input = state.input;
    let in_flight = state.in_flight;
    let notification = state.notification;

    let on_submit = {
        let state = state.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();

            if in_flight.get_untracked() {
                return;
            }

            let Some(weight_kg) = parse_weight(&input.get_untracked()) else {
                state.show_error(INVALID_WEIGHT_MESSAGE);
                return;
            };

            in_flight.set(true);

            let state = state.clone();
            spawn_local(async move {
                let today = chrono::Local::now().date_naive();

                match api::append_entry(weight_kg, today).await {
                    Ok(response) => {
                        if let Some((backdrop, message)) = reaction(response.comparison) {
                            state.backdrop.set(backdrop);
                            state.show_notification(message);
                        }

                        match api::fetch_entries().await {
                            Ok(list) => state.entries.set(list),
                            Err(e) => web_sys::console::warn_1(
                                &format!("Failed to refresh entries: {}", e).into(),
                            ),
                        }

                        state.input.set(String::new());
                        state.show_success(SAVED_MESSAGE);
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("Failed to save weight: {}", e).into());
                        state.show_error(SAVE_FAILED_MESSAGE);
                    }
                }

                state.in_flight.set(false);
            });
        }
    };

    view! {
        <div class="flex flex-col items-center">
            <form on:submit=on_submit class="flex items-center space-x-2">
                <input
                    type="number"
                    step="0.1"
                    placeholder="kg"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    disabled=move || in_flight.get()
                    class="w-40 bg-white/20 border border-white/40 rounded-lg px-4 py-3 text-2xl
                           text-center placeholder-white/60 focus:outline-none focus:border-white"
                />
                <button
                    type="submit"
                    disabled=move || in_flight.get()
                    class="bg-white/30 hover:bg-white/40 disabled:cursor-not-allowed rounded-lg
                           px-5 py-3 text-2xl font-semibold transition-colors"
                >
                    {move || if in_flight.get() { "..." } else { "→" }}
                </button>
            </form>

            <p class="h-8 mt-6 text-2xl font-semibold">
                {move || notification.get().unwrap_or_default()}
            </p>
        </div>
    }
}

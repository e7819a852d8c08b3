//! History Panel
//!
//! Floating toggle button and an overlay listing every entry. Clicking the
//! dimmed backdrop or the close control hides it; clicks inside the panel
//! do not reach the backdrop.

use leptos::*;

use crate::state::form::{history_line, EMPTY_HISTORY};
use crate::state::global::GlobalState;

#[component]
pub fn HistoryButton() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <button
            type="button"
            on:click=move |_| state.toggle_history()
            class="fixed bottom-6 right-6 w-14 h-14 rounded-full bg-white/30 hover:bg-white/40
                   text-2xl shadow-lg"
            title="History"
        >
            "☰"
        </button>
    }
}

#[component]
pub fn HistoryPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let visible = state.history_visible;
    let entries = state.entries;
    let close = {
        let state = state.clone();
        move |_: web_sys::MouseEvent| state.close_history()
    };

    view! {
        <Show when=move || visible.get()>
            <div
                class="fixed inset-0 bg-black/50 flex items-center justify-center z-40"
                on:click=close.clone()
            >
                <div
                    class="bg-gray-900 text-white rounded-lg shadow-xl w-80 max-h-[70vh]
                           overflow-y-auto p-6"
                    on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <div class="flex items-center justify-between mb-4">
                        <h2 class="text-xl font-bold">"History"</h2>
                        <button
                            type="button"
                            on:click=close.clone()
                            class="text-gray-400 hover:text-white text-xl"
                        >
                            "✕"
                        </button>
                    </div>
                    {move || {
                        let list = entries.get();
                        if list.is_empty() {
                            view! { <p class="text-gray-400">{EMPTY_HISTORY}</p> }.into_view()
                        } else {
                            list.iter()
                                .map(|entry| view! {
                                    <p class="font-mono py-1 border-b border-gray-800">
                                        {history_line(entry)}
                                    </p>
                                })
                                .collect_view()
                        }
                    }}
                </div>
            </div>
        </Show>
    }
}

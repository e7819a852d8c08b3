//! Weightlog
//!
//! Single-page weight form built with Leptos (WASM).
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! It talks to the Weightlog API over HTTP: it lists entries on load, posts
//! one entry per submit, and reacts to the comparison the server returns.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}

//! State Management
//!
//! Reactive form state and the pure logic behind it.

pub mod form;
pub mod global;

pub use global::{provide_global_state, GlobalState};

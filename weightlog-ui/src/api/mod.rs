//! API Client Module
//!
//! HTTP client for the Weightlog REST API.

mod client;

pub use client::*;

//! Wealthtrack Client - HTTP access to the Wealthtrack backend.
//!
//! [`ApiClient`] implements every provider trait from `wealthtrack-core`, so
//! the services there can be wired directly against the live backend.

mod client;

pub use client::{ApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

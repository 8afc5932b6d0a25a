//! Wealthtrack Core - domain models, analytics, and service traits.
//!
//! This crate contains the client-side business logic for Wealthtrack.
//! It performs no I/O of its own: the remote backend is reached through the
//! provider traits defined here and implemented by `wealthtrack-client`.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod market_data;
pub mod portfolio;
pub mod session;
pub mod users;

// Re-export common types from asset and portfolio modules
pub use assets::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

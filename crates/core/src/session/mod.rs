//! Session module - client-side authentication state and its storage.

mod session_service;
mod session_store;


pub use session_service::{SessionService, SessionServiceTrait};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStoreTrait};

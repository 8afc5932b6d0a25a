//! Users module - identity records and the remote auth contract.

mod users_model;
mod users_traits;

pub use users_model::{AuthSession, Credentials, Registration, User};
pub use users_traits::AuthProviderTrait;

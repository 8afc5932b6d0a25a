use async_trait::async_trait;

use super::users_model::{AuthSession, Credentials, Registration, User};
use crate::errors::Result;

/// Remote identity provider: issues tokens and resolves them to users.
#[async_trait]
pub trait AuthProviderTrait: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession>;
    async fn register(&self, registration: &Registration) -> Result<AuthSession>;
    async fn current_user(&self, token: &str) -> Result<User>;
}

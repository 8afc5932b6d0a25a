use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::session_store::SessionStoreTrait;
use crate::errors::{Error, Result};
use crate::users::{AuthProviderTrait, AuthSession, Credentials, Registration, User};

/// Login/logout lifecycle of the client.
#[async_trait]
pub trait SessionServiceTrait: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<User>;
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User>;
    /// Forgets the stored session. Safe to call when already signed out.
    fn logout(&self) -> Result<()>;
    /// Returns the stored session, or `Error::Unauthorized` when signed out.
    fn current_session(&self) -> Result<AuthSession>;
    fn is_authenticated(&self) -> Result<bool>;
    /// Re-reads the user profile for the stored token.
    async fn refresh_profile(&self) -> Result<User>;
}

pub struct SessionService {
    auth_provider: Arc<dyn AuthProviderTrait>,
    store: Arc<dyn SessionStoreTrait>,
}

impl SessionService {
    pub fn new(
        auth_provider: Arc<dyn AuthProviderTrait>,
        store: Arc<dyn SessionStoreTrait>,
    ) -> Self {
        Self {
            auth_provider,
            store,
        }
    }

    fn establish(&self, session: AuthSession) -> Result<User> {
        self.store.save(&session)?;
        info!("[Session] Signed in as {}", session.user.email);
        Ok(session.user)
    }
}

#[async_trait]
impl SessionServiceTrait for SessionService {
    async fn login(&self, email: &str, password: &str) -> Result<User> {
        let credentials = Credentials::new(email, password);
        credentials.validate()?;

        let session = self.auth_provider.login(&credentials).await?;
        self.establish(session)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let registration = Registration::new(name, email, password);
        registration.validate()?;

        let session = self.auth_provider.register(&registration).await?;
        self.establish(session)
    }

    fn logout(&self) -> Result<()> {
        self.store.clear()?;
        info!("[Session] Signed out");
        Ok(())
    }

    fn current_session(&self) -> Result<AuthSession> {
        self.store.load()?.ok_or(Error::Unauthorized)
    }

    fn is_authenticated(&self) -> Result<bool> {
        Ok(self.store.load()?.is_some())
    }

    async fn refresh_profile(&self) -> Result<User> {
        let session = self.current_session()?;

        match self.auth_provider.current_user(&session.token).await {
            Ok(user) => {
                debug!("[Session] Refreshed profile for {}", user.email);
                self.store.save(&AuthSession {
                    token: session.token,
                    user: user.clone(),
                })?;
                Ok(user)
            }
            Err(Error::Unauthorized) => {
                warn!("[Session] Stored token was rejected; clearing session");
                self.store.clear()?;
                Err(Error::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }
}

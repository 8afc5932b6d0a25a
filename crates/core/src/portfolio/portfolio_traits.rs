use async_trait::async_trait;

use super::portfolio_model::PortfolioSnapshot;
use super::portfolio_service::Dashboard;
use crate::errors::Result;

/// Remote source of priced portfolio snapshots.
#[async_trait]
pub trait PortfolioProviderTrait: Send + Sync {
    async fn fetch_portfolio(&self, token: &str) -> Result<PortfolioSnapshot>;
}

#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Fetches a fresh snapshot and derives analytics from it.
    ///
    /// Returns `Ok(None)` when a newer refresh already published its result
    /// while this one was in flight.
    async fn refresh(&self, token: &str) -> Result<Option<Dashboard>>;

    /// Last published dashboard, if any refresh has succeeded.
    fn latest(&self) -> Option<Dashboard>;

    /// Forgets the published dashboard (e.g. on logout).
    fn clear(&self);
}

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::analytics::{calculate_analytics, PortfolioAnalytics};
use super::portfolio_model::PortfolioSnapshot;
use super::portfolio_traits::{PortfolioProviderTrait, PortfolioServiceTrait};
use super::request_sequencer::RequestSequencer;
use crate::errors::Result;

/// A snapshot together with the analytics derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub snapshot: PortfolioSnapshot,
    pub analytics: PortfolioAnalytics,
    /// Sequence number of the fetch that produced this dashboard.
    pub sequence: u64,
    pub fetched_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn from_snapshot(snapshot: PortfolioSnapshot, sequence: u64) -> Self {
        let analytics = calculate_analytics(&snapshot);
        Self {
            snapshot,
            analytics,
            sequence,
            fetched_at: Utc::now(),
        }
    }
}

/// Owns the dashboard view state: fetch, derive, publish newest.
pub struct PortfolioService {
    portfolio_provider: Arc<dyn PortfolioProviderTrait>,
    sequencer: RequestSequencer,
    latest: RwLock<Option<Dashboard>>,
}

impl PortfolioService {
    pub fn new(portfolio_provider: Arc<dyn PortfolioProviderTrait>) -> Self {
        Self {
            portfolio_provider,
            sequencer: RequestSequencer::new(),
            latest: RwLock::new(None),
        }
    }

    fn publish(&self, dashboard: Option<Dashboard>) {
        let mut guard = match self.latest.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = dashboard;
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn refresh(&self, token: &str) -> Result<Option<Dashboard>> {
        let request = self.sequencer.begin();
        debug!("[PortfolioService] Fetch #{} started", request.sequence());

        let snapshot = self.portfolio_provider.fetch_portfolio(token).await?;
        let dashboard = Dashboard::from_snapshot(snapshot, request.sequence());

        let published = self
            .sequencer
            .apply_if_current(request, || self.publish(Some(dashboard.clone())));
        if !published {
            debug!(
                "[PortfolioService] Discarding stale fetch #{}",
                request.sequence()
            );
            return Ok(None);
        }

        info!(
            "[PortfolioService] Fetch #{} published: {} holdings, total value {:.2}",
            request.sequence(),
            dashboard.analytics.total_assets,
            dashboard.snapshot.total_value
        );
        Ok(Some(dashboard))
    }

    fn latest(&self) -> Option<Dashboard> {
        match self.latest.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn clear(&self) {
        // Claim a fresh token so fetches still in flight land as stale.
        let request = self.sequencer.begin();
        self.sequencer.apply_if_current(request, || self.publish(None));
    }
}

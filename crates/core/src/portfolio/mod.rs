//! Portfolio module - snapshots, analytics and the dashboard view state.

pub mod analytics;
mod portfolio_model;
mod portfolio_service;
mod portfolio_traits;
mod request_sequencer;


pub use analytics::{calculate_analytics, AllocationSlice, PortfolioAnalytics};
pub use portfolio_model::{Holding, PortfolioSnapshot};
pub use portfolio_service::{Dashboard, PortfolioService};
pub use portfolio_traits::{PortfolioProviderTrait, PortfolioServiceTrait};
pub use request_sequencer::{RequestSequencer, RequestToken};

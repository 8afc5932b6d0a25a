//! Dashboard analytics derived from a portfolio snapshot.

mod analytics_calculator;
mod analytics_model;


pub use analytics_calculator::calculate_analytics;
pub use analytics_model::{AllocationSlice, PortfolioAnalytics};

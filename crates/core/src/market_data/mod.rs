//! Market data module - price quotes fetched through the backend.

mod market_data_model;
mod market_data_traits;

// Re-export the public interface
pub use market_data_model::PriceQuote;
pub use market_data_traits::PriceProviderTrait;

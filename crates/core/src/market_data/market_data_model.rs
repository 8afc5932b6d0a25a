use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest unit price the backend reports for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    /// Upstream the backend took the price from (e.g. "yahoo", "coingecko", "cache").
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::assets::AssetType;

/// One owned position, priced by the backend at snapshot time.
///
/// All monetary fields are server-computed and taken as-is; the client never
/// re-derives `current_value` or `gain_loss`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub purchase_price: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_price: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cost: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_value: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub gain_loss: f64,
    /// Already scaled: 12.5 means 12.5%.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub gain_loss_percent: f64,
    /// `None` when the backend could not price the asset.
    #[serde(default)]
    pub last_price_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub price_source: Option<String>,
}

impl Holding {
    pub fn is_priced(&self) -> bool {
        self.last_price_update.is_some()
    }
}

/// Point-in-time valuation of every holding plus server-side totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_value: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_cost: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_gain_loss: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_gain_loss_percent: f64,
    #[serde(default)]
    pub assets: Vec<Holding>,
}

impl PortfolioSnapshot {
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

// JSON has no representation for an unbounded percentage; the backend sends
// null instead (e.g. gain percent on a zero cost basis).
fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_deserializes_backend_shape() {
        let payload = json!({
            "totalValue": 1500.0,
            "totalCost": 1000.0,
            "totalGainLoss": 500.0,
            "totalGainLossPercent": 50.0,
            "assets": [{
                "id": "a1",
                "symbol": "AAPL",
                "name": "Apple",
                "type": "STOCK",
                "quantity": 10,
                "purchasePrice": 100,
                "currentPrice": 150,
                "cost": 1000,
                "currentValue": 1500,
                "gainLoss": 500,
                "gainLossPercent": 50,
                "lastPriceUpdate": "2024-06-01T12:00:00Z",
                "priceSource": "yahoo"
            }]
        });

        let snapshot: PortfolioSnapshot = serde_json::from_value(payload).unwrap();
        assert_eq!(snapshot.assets.len(), 1);
        let holding = &snapshot.assets[0];
        assert_eq!(holding.asset_type, AssetType::Stock);
        assert_eq!(holding.gain_loss_percent, 50.0);
        assert!(holding.is_priced());
        assert_eq!(holding.price_source.as_deref(), Some("yahoo"));
    }

    #[test]
    fn test_null_numeric_fields_read_as_zero() {
        let payload = json!({
            "totalValue": 0,
            "totalCost": 0,
            "totalGainLoss": 0,
            "totalGainLossPercent": null,
            "assets": [{
                "id": "a1",
                "symbol": "FREE",
                "name": "Gifted shares",
                "type": "STOCK",
                "quantity": 5,
                "purchasePrice": 0,
                "currentPrice": null,
                "cost": 0,
                "currentValue": 0,
                "gainLoss": 0,
                "gainLossPercent": null,
                "lastPriceUpdate": null,
                "priceSource": "unavailable"
            }]
        });

        let snapshot: PortfolioSnapshot = serde_json::from_value(payload).unwrap();
        let holding = &snapshot.assets[0];
        assert_eq!(holding.gain_loss_percent, 0.0);
        assert_eq!(holding.current_price, 0.0);
        assert!(!holding.is_priced());
        assert_eq!(snapshot.total_gain_loss_percent, 0.0);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot: PortfolioSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_value, 0.0);
    }
}

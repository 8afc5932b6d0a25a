use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assets::AssetType;
use crate::portfolio::Holding;

/// Secondary statistics shown on the dashboard.
///
/// Derived from exactly one snapshot and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalytics {
    pub top_performer: Option<Holding>,
    pub worst_performer: Option<Holding>,
    /// Unweighted mean of per-holding gain percentages.
    pub avg_return: f64,
    /// Population standard deviation of per-holding gain percentages.
    pub volatility: f64,
    /// Summed current value per asset type. Types worth nothing are absent.
    pub type_distribution: BTreeMap<AssetType, f64>,
    /// Share of total value held by the largest asset type group.
    pub concentration: f64,
    pub risk_score: f64,
    pub diversification_score: f64,
    pub total_assets: usize,
    pub total_gainers: usize,
    pub total_losers: usize,
}

/// One asset type's share of the portfolio, for allocation charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub asset_type: AssetType,
    pub value: f64,
    pub percent: f64,
}

impl PortfolioAnalytics {
    /// Number of asset types with a non-zero value.
    pub fn distinct_types(&self) -> usize {
        self.type_distribution.len()
    }

    /// Type distribution as percentages of `total_value`, largest first.
    pub fn allocation(&self, total_value: f64) -> Vec<AllocationSlice> {
        let mut slices: Vec<AllocationSlice> = self
            .type_distribution
            .iter()
            .map(|(asset_type, value)| AllocationSlice {
                asset_type: *asset_type,
                value: *value,
                percent: if total_value > 0.0 {
                    value / total_value * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        slices.sort_by(|a, b| b.value.total_cmp(&a.value));
        slices
    }
}

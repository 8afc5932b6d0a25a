use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::assets::AssetType;
use crate::constants::{
    DIVERSIFICATION_SPREAD_WEIGHT, DIVERSIFICATION_TYPE_WEIGHT, RISK_CONCENTRATION_WEIGHT,
    RISK_VOLATILITY_WEIGHT, SCORE_CEILING,
};
use crate::portfolio::{Holding, PortfolioSnapshot};

use super::PortfolioAnalytics;

/// Derives dashboard analytics from a snapshot.
///
/// Pure and total: an empty snapshot yields `PortfolioAnalytics::default()`,
/// and a zero `total_value` yields zero concentration instead of dividing by
/// zero. The caller's holdings are never reordered.
pub fn calculate_analytics(snapshot: &PortfolioSnapshot) -> PortfolioAnalytics {
    let holdings = &snapshot.assets;
    if holdings.is_empty() {
        return PortfolioAnalytics::default();
    }

    let (top_performer, worst_performer) = rank_performers(holdings);

    let count = holdings.len() as f64;
    let avg_return = holdings.iter().map(|h| h.gain_loss_percent).sum::<f64>() / count;
    let variance = holdings
        .iter()
        .map(|h| (h.gain_loss_percent - avg_return).powi(2))
        .sum::<f64>()
        / count;
    let volatility = variance.sqrt();

    let type_distribution = distribution_by_type(holdings);
    let concentration = concentration(&type_distribution, snapshot.total_value);

    let risk_score = (volatility * RISK_VOLATILITY_WEIGHT
        + concentration * RISK_CONCENTRATION_WEIGHT)
        .min(SCORE_CEILING);
    let diversification_score = (type_distribution.len() as f64 * DIVERSIFICATION_TYPE_WEIGHT
        + (1.0 - concentration) * DIVERSIFICATION_SPREAD_WEIGHT)
        .min(SCORE_CEILING);

    PortfolioAnalytics {
        top_performer,
        worst_performer,
        avg_return,
        volatility,
        type_distribution,
        concentration,
        risk_score,
        diversification_score,
        total_assets: holdings.len(),
        total_gainers: holdings.iter().filter(|h| h.gain_loss > 0.0).count(),
        total_losers: holdings.iter().filter(|h| h.gain_loss < 0.0).count(),
    }
}

/// Stable descending sort on gain percent over borrowed holdings.
/// Ties keep snapshot order, so the best is the first of equals and the
/// worst is the last of equals. `-0.0` and `0.0` compare equal.
fn rank_performers(holdings: &[Holding]) -> (Option<Holding>, Option<Holding>) {
    let mut ranked: Vec<&Holding> = holdings.iter().collect();
    ranked.sort_by(|a, b| {
        b.gain_loss_percent
            .partial_cmp(&a.gain_loss_percent)
            .unwrap_or(Ordering::Equal)
    });
    (
        ranked.first().map(|h| (*h).clone()),
        ranked.last().map(|h| (*h).clone()),
    )
}

fn distribution_by_type(holdings: &[Holding]) -> BTreeMap<AssetType, f64> {
    let mut distribution: BTreeMap<AssetType, f64> = BTreeMap::new();
    for holding in holdings {
        *distribution.entry(holding.asset_type).or_insert(0.0) += holding.current_value;
    }
    distribution.retain(|_, value| *value != 0.0);
    distribution
}

fn concentration(distribution: &BTreeMap<AssetType, f64>, total_value: f64) -> f64 {
    if total_value == 0.0 {
        return 0.0;
    }
    distribution
        .values()
        .copied()
        .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))))
        .map_or(0.0, |largest| largest / total_value)
}

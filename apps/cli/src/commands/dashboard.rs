//! Dashboard command: totals, holdings, analytics and allocation.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use wealthtrack_core::{Dashboard, Holding, PortfolioAnalytics, PortfolioServiceTrait};

use crate::cli::OutputFormat;
use crate::commands::session_token;
use crate::main_lib::AppState;
use crate::output::{
    colorize_change, format_money, format_percent, format_score, print_header, print_info,
    print_json, print_table, KeyValue,
};

/// One holding row of the dashboard.
#[derive(Debug, Serialize, Tabled)]
pub struct HoldingRow {
    #[tabled(rename = "Symbol")]
    pub symbol: String,
    #[tabled(rename = "Type")]
    pub asset_type: String,
    #[tabled(rename = "Quantity")]
    pub quantity: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Gain/Loss")]
    pub gain_loss: String,
    #[tabled(rename = "Return")]
    pub gain_loss_percent: String,
}

impl From<&Holding> for HoldingRow {
    fn from(holding: &Holding) -> Self {
        let price = if holding.is_priced() {
            format_money(holding.current_price)
        } else {
            "n/a".to_string()
        };
        Self {
            symbol: holding.symbol.clone(),
            asset_type: holding.asset_type.label().to_string(),
            quantity: holding.quantity.to_string(),
            price,
            value: format_money(holding.current_value),
            gain_loss: colorize_change(format_money(holding.gain_loss), holding.gain_loss),
            gain_loss_percent: colorize_change(
                format_percent(holding.gain_loss_percent),
                holding.gain_loss_percent,
            ),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct AllocationRow {
    #[tabled(rename = "Type")]
    asset_type: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Share")]
    share: String,
}

pub async fn execute(state: &AppState, format: OutputFormat) -> Result<()> {
    let token = session_token(state)?;
    let dashboard = match state.portfolio_service.refresh(&token).await? {
        Some(dashboard) => dashboard,
        None => state
            .portfolio_service
            .latest()
            .ok_or_else(|| anyhow::anyhow!("Portfolio refresh was superseded"))?,
    };

    match format {
        OutputFormat::Json => print_json(&dashboard),
        OutputFormat::Table => {
            print_dashboard(&dashboard);
            Ok(())
        }
    }
}

pub fn print_dashboard(dashboard: &Dashboard) {
    let snapshot = &dashboard.snapshot;

    print_header("Portfolio");
    print_table(&summary_rows(dashboard));

    if snapshot.is_empty() {
        print_info("No assets yet. Add one with `wealthtrack assets add`.");
        return;
    }

    print_header("Holdings");
    let rows: Vec<HoldingRow> = snapshot.assets.iter().map(HoldingRow::from).collect();
    print_table(&rows);

    print_header("Analytics");
    print_table(&analytics_rows(&dashboard.analytics));

    print_header("Allocation");
    let allocation: Vec<AllocationRow> = dashboard
        .analytics
        .allocation(snapshot.total_value)
        .into_iter()
        .map(|slice| AllocationRow {
            asset_type: slice.asset_type.label().to_string(),
            value: format_money(slice.value),
            share: format!("{:.1}%", slice.percent),
        })
        .collect();
    print_table(&allocation);
}

fn summary_rows(dashboard: &Dashboard) -> Vec<KeyValue> {
    let snapshot = &dashboard.snapshot;
    vec![
        KeyValue::new("Total value", format_money(snapshot.total_value)),
        KeyValue::new("Total cost", format_money(snapshot.total_cost)),
        KeyValue::new(
            "Gain/Loss",
            colorize_change(format_money(snapshot.total_gain_loss), snapshot.total_gain_loss),
        ),
        KeyValue::new(
            "Return",
            colorize_change(
                format_percent(snapshot.total_gain_loss_percent),
                snapshot.total_gain_loss_percent,
            ),
        ),
        KeyValue::new(
            "Updated",
            dashboard.fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
    ]
}

fn performer(holding: Option<&Holding>) -> String {
    holding
        .map(|h| format!("{} ({})", h.symbol, format_percent(h.gain_loss_percent)))
        .unwrap_or_else(|| "-".to_string())
}

fn analytics_rows(analytics: &PortfolioAnalytics) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Top performer", performer(analytics.top_performer.as_ref())),
        KeyValue::new("Worst performer", performer(analytics.worst_performer.as_ref())),
        KeyValue::new("Average return", format_percent(analytics.avg_return)),
        KeyValue::new("Volatility", format!("{:.2}", analytics.volatility)),
        KeyValue::new("Asset types", analytics.distinct_types().to_string()),
        KeyValue::new(
            "Concentration",
            format!("{:.1}%", analytics.concentration * 100.0),
        ),
        KeyValue::new("Risk score", format_score(analytics.risk_score)),
        KeyValue::new(
            "Diversification score",
            format_score(analytics.diversification_score),
        ),
        KeyValue::new(
            "Gainers / Losers",
            format!(
                "{} / {} of {}",
                analytics.total_gainers, analytics.total_losers, analytics.total_assets
            ),
        ),
    ]
}

//! Asset management commands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use wealthtrack_core::{
    Asset, AssetServiceTrait, AssetType, Holding, NewAsset, PortfolioServiceTrait,
};

use crate::cli::{AssetCommands, OutputFormat};
use crate::commands::{parse_asset_type, session_token};
use crate::main_lib::AppState;
use crate::output::{
    colorize_change, format_money, format_percent, print_header, print_info, print_json,
    print_success, print_table, print_warning, KeyValue,
};

/// Arguments for adding an asset.
#[derive(Args, Debug)]
pub struct AddAssetArgs {
    /// Ticker symbol, e.g. AAPL or BTC
    pub symbol: String,

    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Asset type (stock, crypto, etf, bond, other)
    #[arg(short = 't', long = "type", value_parser = parse_asset_type)]
    pub asset_type: AssetType,

    /// Number of units held
    #[arg(short, long)]
    pub quantity: f64,

    /// Purchase price per unit
    #[arg(short, long)]
    pub price: f64,

    /// Purchase date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

impl From<AddAssetArgs> for NewAsset {
    fn from(args: AddAssetArgs) -> Self {
        NewAsset {
            symbol: args.symbol,
            name: args.name,
            asset_type: args.asset_type,
            quantity: args.quantity,
            purchase_price: args.price,
            purchase_date: args.date,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct AssetRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    asset_type: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Purchase Price")]
    purchase_price: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

impl From<&Asset> for AssetRow {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            symbol: asset.symbol.clone(),
            name: asset.name.clone(),
            asset_type: asset.asset_type.label().to_string(),
            quantity: asset.quantity.to_string(),
            purchase_price: format_money(asset.purchase_price),
            cost: format_money(asset.cost()),
        }
    }
}

/// Asset detail for JSON output: the stored record plus its valuation, if priced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetDetail {
    asset: Asset,
    valuation: Option<Holding>,
}

pub async fn execute(state: &AppState, command: AssetCommands, format: OutputFormat) -> Result<()> {
    let token = session_token(state)?;
    match command {
        AssetCommands::List => list(state, &token, format).await,
        AssetCommands::Show { id } => show(state, &token, &id, format).await,
        AssetCommands::Add(args) => add(state, &token, args, format).await,
        AssetCommands::Delete { id } => delete(state, &token, &id, format).await,
    }
}

async fn list(state: &AppState, token: &str, format: OutputFormat) -> Result<()> {
    let assets = state.asset_service.get_assets(token).await?;
    match format {
        OutputFormat::Json => print_json(&assets),
        OutputFormat::Table => {
            let rows: Vec<AssetRow> = assets.iter().map(AssetRow::from).collect();
            print_table(&rows);
            Ok(())
        }
    }
}

async fn show(state: &AppState, token: &str, asset_id: &str, format: OutputFormat) -> Result<()> {
    let asset = state.asset_service.get_asset_by_id(token, asset_id).await?;

    // Valuation comes from the priced portfolio; a failed refresh still shows the record.
    let valuation = match state.portfolio_service.refresh(token).await {
        Ok(_) => state.portfolio_service.latest().and_then(|dashboard| {
            dashboard
                .snapshot
                .assets
                .into_iter()
                .find(|holding| holding.id == asset.id)
        }),
        Err(e) if e.is_unauthorized() => return Err(e.into()),
        Err(e) => {
            log_valuation_failure(&e);
            None
        }
    };

    match format {
        OutputFormat::Json => print_json(&AssetDetail { asset, valuation }),
        OutputFormat::Table => {
            print_header(&format!("{} - {}", asset.symbol, asset.name));
            print_table(&detail_rows(&asset, valuation.as_ref()));
            Ok(())
        }
    }
}

async fn add(
    state: &AppState,
    token: &str,
    args: AddAssetArgs,
    format: OutputFormat,
) -> Result<()> {
    let asset = state.asset_service.add_asset(token, args.into()).await?;
    match format {
        OutputFormat::Json => print_json(&asset)?,
        OutputFormat::Table => {
            print_success(&format!("Added {} ({})", asset.symbol, asset.id));
        }
    }
    refresh_after_change(state, token, format).await
}

async fn delete(state: &AppState, token: &str, asset_id: &str, format: OutputFormat) -> Result<()> {
    state.asset_service.delete_asset(token, asset_id).await?;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "deleted": asset_id }))?,
        OutputFormat::Table => print_success(&format!("Deleted asset {}", asset_id)),
    }
    refresh_after_change(state, token, format).await
}

/// Re-fetches the portfolio after a mutation so totals reflect it.
async fn refresh_after_change(state: &AppState, token: &str, format: OutputFormat) -> Result<()> {
    match state.portfolio_service.refresh(token).await {
        Ok(Some(dashboard)) => {
            if format == OutputFormat::Table {
                print_info(&format!(
                    "Portfolio value is now {}",
                    format_money(dashboard.snapshot.total_value)
                ));
            }
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) if e.is_unauthorized() => Err(e.into()),
        Err(e) => {
            log_valuation_failure(&e);
            Ok(())
        }
    }
}

fn log_valuation_failure(error: &wealthtrack_core::Error) {
    tracing::warn!("Portfolio refresh failed: {}", error);
    print_warning("Could not load current valuation");
}

fn detail_rows(asset: &Asset, valuation: Option<&Holding>) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Id", asset.id.clone()),
        KeyValue::new("Type", asset.asset_type.label()),
        KeyValue::new("Quantity", asset.quantity.to_string()),
        KeyValue::new("Purchase price", format_money(asset.purchase_price)),
        KeyValue::new("Cost", format_money(asset.cost())),
    ];
    if let Some(date) = asset.purchase_date {
        rows.push(KeyValue::new("Purchased", date.to_string()));
    }

    match valuation {
        Some(holding) if holding.is_priced() => {
            rows.push(KeyValue::new("Current price", format_money(holding.current_price)));
            rows.push(KeyValue::new("Current value", format_money(holding.current_value)));
            rows.push(KeyValue::new(
                "Gain/Loss",
                colorize_change(format_money(holding.gain_loss), holding.gain_loss),
            ));
            rows.push(KeyValue::new(
                "Return",
                colorize_change(
                    format_percent(holding.gain_loss_percent),
                    holding.gain_loss_percent,
                ),
            ));
            if let Some(source) = &holding.price_source {
                rows.push(KeyValue::new("Price source", source.clone()));
            }
        }
        _ => rows.push(KeyValue::new("Current price", "unavailable")),
    }
    rows
}

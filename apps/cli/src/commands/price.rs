//! Price lookup command.

use anyhow::Result;
use clap::Args;

use wealthtrack_core::market_data::PriceProviderTrait;
use wealthtrack_core::AssetType;

use crate::cli::OutputFormat;
use crate::commands::{parse_asset_type, session_token};
use crate::main_lib::AppState;
use crate::output::{format_money, print_header, print_json, print_table, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Ticker symbol, e.g. AAPL or BTC
    pub symbol: String,

    /// Asset type, which decides the price source (stock, crypto, etf, bond, other)
    #[arg(short = 't', long = "type", default_value = "stock", value_parser = parse_asset_type)]
    pub asset_type: AssetType,
}

pub async fn execute(state: &AppState, args: PriceArgs, format: OutputFormat) -> Result<()> {
    let token = session_token(state)?;
    let quote = state
        .price_provider
        .get_price(&token, args.symbol.trim(), args.asset_type)
        .await?;

    match format {
        OutputFormat::Json => print_json(&quote),
        OutputFormat::Table => {
            let mut rows = vec![
                KeyValue::new("Symbol", quote.symbol.clone()),
                KeyValue::new("Price", format_money(quote.price)),
            ];
            if let Some(currency) = &quote.currency {
                rows.push(KeyValue::new("Currency", currency.clone()));
            }
            if let Some(source) = &quote.source {
                rows.push(KeyValue::new("Source", source.clone()));
            }
            if let Some(timestamp) = quote.timestamp {
                rows.push(KeyValue::new(
                    "As of",
                    timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
                ));
            }
            print_header(&format!("{} ({})", quote.symbol, args.asset_type.label()));
            print_table(&rows);
            Ok(())
        }
    }
}

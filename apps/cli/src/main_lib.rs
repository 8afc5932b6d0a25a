use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wealthtrack_client::ApiClient;
use wealthtrack_core::market_data::PriceProviderTrait;
use wealthtrack_core::session::{FileSessionStore, SessionService, SessionServiceTrait};
use wealthtrack_core::{AssetService, AssetServiceTrait, PortfolioService, PortfolioServiceTrait};

use crate::config::{Config, LogFormat};

/// Services shared by every command.
pub struct AppState {
    pub session_service: Arc<dyn SessionServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub asset_service: Arc<dyn AssetServiceTrait>,
    pub price_provider: Arc<dyn PriceProviderTrait>,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output, so logs go to stderr
    if log_format == LogFormat::Json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let api_client = Arc::new(ApiClient::with_timeout(
        &config.api_url,
        config.request_timeout,
    )?);
    tracing::debug!("Backend in use: {}", api_client.base_url());

    let session_store = Arc::new(FileSessionStore::new(config.session_file.clone()));
    tracing::debug!("Session file in use: {}", session_store.path().display());

    let session_service = Arc::new(SessionService::new(api_client.clone(), session_store));
    let portfolio_service = Arc::new(PortfolioService::new(api_client.clone()));
    let asset_service = Arc::new(AssetService::new(api_client.clone()));

    Ok(AppState {
        session_service,
        portfolio_service,
        asset_service,
        price_provider: api_client,
    })
}

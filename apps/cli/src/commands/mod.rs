//! CLI command implementations.

pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod price;

pub use assets::AddAssetArgs;
pub use auth::{LoginArgs, RegisterArgs};
pub use price::PriceArgs;

use wealthtrack_core::session::SessionServiceTrait;
use wealthtrack_core::{AssetType, Result};

use crate::main_lib::AppState;

/// Bearer token of the stored session, or `Error::Unauthorized` when signed out.
pub fn session_token(state: &AppState) -> Result<String> {
    Ok(state.session_service.current_session()?.token)
}

/// Parses an asset type argument such as `stock` or `ETF`.
pub fn parse_asset_type(s: &str) -> std::result::Result<AssetType, String> {
    s.parse::<AssetType>().map_err(String::from)
}

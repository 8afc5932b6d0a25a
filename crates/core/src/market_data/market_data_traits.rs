use async_trait::async_trait;

use super::market_data_model::PriceQuote;
use crate::assets::AssetType;
use crate::errors::Result;

/// Remote price lookup. The asset type decides which upstream the backend asks.
#[async_trait]
pub trait PriceProviderTrait: Send + Sync {
    async fn get_price(&self, token: &str, symbol: &str, asset_type: AssetType)
        -> Result<PriceQuote>;
}

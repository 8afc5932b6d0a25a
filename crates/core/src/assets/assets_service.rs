use log::{debug, info};
use std::sync::Arc;

use super::assets_model::{Asset, NewAsset};
use super::assets_traits::{AssetProviderTrait, AssetServiceTrait};
use crate::errors::Result;

/// Service for managing a user's stored assets through the backend.
pub struct AssetService {
    asset_provider: Arc<dyn AssetProviderTrait>,
}

impl AssetService {
    /// Creates a new AssetService instance
    pub fn new(asset_provider: Arc<dyn AssetProviderTrait>) -> Self {
        Self { asset_provider }
    }
}

#[async_trait::async_trait]
impl AssetServiceTrait for AssetService {
    async fn get_assets(&self, token: &str) -> Result<Vec<Asset>> {
        let assets = self.asset_provider.list_assets(token).await?;
        debug!("[AssetService] Loaded {} assets", assets.len());
        Ok(assets)
    }

    async fn get_asset_by_id(&self, token: &str, asset_id: &str) -> Result<Asset> {
        self.asset_provider.get_asset(token, asset_id).await
    }

    async fn add_asset(&self, token: &str, new_asset: NewAsset) -> Result<Asset> {
        let new_asset = new_asset.normalized();
        new_asset.validate()?;

        let asset = self.asset_provider.create_asset(token, &new_asset).await?;
        info!(
            "[AssetService] Added {} ({}) as asset {}",
            asset.symbol, asset.asset_type, asset.id
        );
        Ok(asset)
    }

    async fn delete_asset(&self, token: &str, asset_id: &str) -> Result<()> {
        self.asset_provider.delete_asset(token, asset_id).await?;
        info!("[AssetService] Deleted asset {}", asset_id);
        Ok(())
    }
}

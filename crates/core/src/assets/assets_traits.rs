use super::assets_model::{Asset, NewAsset};
use crate::errors::Result;

/// Remote source of a user's stored assets.
///
/// Every call is authenticated with the session bearer token.
#[async_trait::async_trait]
pub trait AssetProviderTrait: Send + Sync {
    async fn list_assets(&self, token: &str) -> Result<Vec<Asset>>;
    async fn get_asset(&self, token: &str, asset_id: &str) -> Result<Asset>;
    async fn create_asset(&self, token: &str, new_asset: &NewAsset) -> Result<Asset>;
    async fn delete_asset(&self, token: &str, asset_id: &str) -> Result<()>;
}

/// Trait defining the contract for Asset service operations.
#[async_trait::async_trait]
pub trait AssetServiceTrait: Send + Sync {
    async fn get_assets(&self, token: &str) -> Result<Vec<Asset>>;
    async fn get_asset_by_id(&self, token: &str, asset_id: &str) -> Result<Asset>;
    /// Validates and normalizes the form payload before sending it.
    async fn add_asset(&self, token: &str, new_asset: NewAsset) -> Result<Asset>;
    async fn delete_asset(&self, token: &str, asset_id: &str) -> Result<()>;
}

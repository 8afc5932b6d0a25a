//! Unit tests for the asset service.

use super::*;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default)]
struct MockAssetProvider {
    created: Mutex<Vec<NewAsset>>,
    deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl AssetProviderTrait for MockAssetProvider {
    async fn list_assets(&self, _token: &str) -> Result<Vec<Asset>> {
        Ok(vec![])
    }

    async fn get_asset(&self, _token: &str, asset_id: &str) -> Result<Asset> {
        Err(Error::NotFound(format!("asset {}", asset_id)))
    }

    async fn create_asset(&self, _token: &str, new_asset: &NewAsset) -> Result<Asset> {
        self.created.lock().unwrap().push(new_asset.clone());
        Ok(Asset {
            id: "generated".to_string(),
            user_id: Some("u1".to_string()),
            symbol: new_asset.symbol.clone(),
            name: new_asset.name.clone(),
            asset_type: new_asset.asset_type,
            quantity: new_asset.quantity,
            purchase_price: new_asset.purchase_price,
            purchase_date: new_asset.purchase_date,
            created_at: None,
        })
    }

    async fn delete_asset(&self, _token: &str, asset_id: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(asset_id.to_string());
        Ok(())
    }
}

fn form(symbol: &str, quantity: f64) -> NewAsset {
    NewAsset {
        symbol: symbol.to_string(),
        name: "Test Asset".to_string(),
        asset_type: AssetType::Etf,
        quantity,
        purchase_price: 10.0,
        purchase_date: None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn add_asset_normalizes_before_sending() {
    let provider = Arc::new(MockAssetProvider::default());
    let service = AssetService::new(provider.clone());

    let asset = service.add_asset("token", form(" voo ", 2.0)).await.unwrap();

    assert_eq!(asset.symbol, "VOO");
    let created = provider.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].symbol, "VOO");
}

#[tokio::test]
async fn add_asset_rejects_invalid_form_without_calling_backend() {
    let provider = Arc::new(MockAssetProvider::default());
    let service = AssetService::new(provider.clone());

    let result = service.add_asset("token", form("VOO", 0.0)).await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(provider.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_asset_forwards_id() {
    let provider = Arc::new(MockAssetProvider::default());
    let service = AssetService::new(provider.clone());

    service.delete_asset("token", "a42").await.unwrap();

    assert_eq!(*provider.deleted.lock().unwrap(), vec!["a42".to_string()]);
}

#[tokio::test]
async fn get_asset_by_id_propagates_not_found() {
    let service = AssetService::new(Arc::new(MockAssetProvider::default()));

    let result = service.get_asset_by_id("token", "missing").await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}

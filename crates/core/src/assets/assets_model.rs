//! Asset domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_SYMBOL_LEN;
use crate::errors::{Error, Result, ValidationError};

/// Asset class of a holding.
///
/// Serialized as SCREAMING_SNAKE_CASE. Deserialization is lenient: any type
/// string the client does not know lands in `Other` so a new server-side
/// class never breaks a portfolio fetch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum AssetType {
    #[default]
    Stock,
    Crypto,
    Etf,
    Bond,
    Other,
}

impl AssetType {
    pub const ALL: [AssetType; 5] = [
        AssetType::Stock,
        AssetType::Crypto,
        AssetType::Etf,
        AssetType::Bond,
        AssetType::Other,
    ];

    /// Returns the wire representation (SCREAMING_SNAKE_CASE).
    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "STOCK",
            AssetType::Crypto => "CRYPTO",
            AssetType::Etf => "ETF",
            AssetType::Bond => "BOND",
            AssetType::Other => "OTHER",
        }
    }

    /// Human readable label for display.
    pub const fn label(&self) -> &'static str {
        match self {
            AssetType::Stock => "Stock",
            AssetType::Crypto => "Crypto",
            AssetType::Etf => "ETF",
            AssetType::Bond => "Bond",
            AssetType::Other => "Other",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse used for user input.
impl FromStr for AssetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AssetType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown asset type '{}'. Expected one of STOCK, CRYPTO, ETF, BOND, OTHER",
                    s
                )))
            })
    }
}

/// Lenient parse used for server payloads.
impl From<String> for AssetType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(AssetType::Other)
    }
}

/// A stored position as the backend keeps it, without pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub quantity: f64,
    pub purchase_price: f64,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Cost basis of the position.
    pub fn cost(&self) -> f64 {
        self.quantity * self.purchase_price
    }
}

/// Payload of the add-asset form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub quantity: f64,
    pub purchase_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
}

impl NewAsset {
    /// Validates the new asset data
    pub fn validate(&self) -> Result<()> {
        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if symbol.chars().count() > MAX_SYMBOL_LEN {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Symbol '{}' is longer than {} characters",
                symbol, MAX_SYMBOL_LEN
            ))));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Quantity must be greater than zero".to_string(),
            )));
        }
        if !self.purchase_price.is_finite() || self.purchase_price < 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Purchase price cannot be negative".to_string(),
            )));
        }
        Ok(())
    }

    /// Trims text fields and upper-cases the symbol.
    pub fn normalized(self) -> Self {
        Self {
            symbol: self.symbol.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

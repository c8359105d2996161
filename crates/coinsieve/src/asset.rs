//! # Asset Records
//!
//! The engine does not own asset data. It only needs five numeric readings from
//! each record, expressed by [`AssetRecord`]. Anything else a record carries is
//! passed through filtering untouched.
//!
//! [`MarketAsset`] is the concrete record used by the CLI. It understands the
//! usual market-listing JSON (`current_price`, `market_cap`, ...) and keeps every
//! field it does not know about in [`MarketAsset::extra`], so a filtered list
//! serializes back to the same shape it was read from.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The minimal shape the filter engine reads.
pub trait AssetRecord {
    fn current_price(&self) -> f64;
    fn market_cap(&self) -> f64;
    fn total_volume(&self) -> f64;
    fn price_change_percentage_24h(&self) -> f64;
    fn market_cap_rank(&self) -> u32;
}

impl<T: AssetRecord + ?Sized> AssetRecord for &T {
    fn current_price(&self) -> f64 {
        (**self).current_price()
    }

    fn market_cap(&self) -> f64 {
        (**self).market_cap()
    }

    fn total_volume(&self) -> f64 {
        (**self).total_volume()
    }

    fn price_change_percentage_24h(&self) -> f64 {
        (**self).price_change_percentage_24h()
    }

    fn market_cap_rank(&self) -> u32 {
        (**self).market_cap_rank()
    }
}

/// A market listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAsset {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub price_change_percentage_24h: f64,
    pub market_cap_rank: u32,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MarketAsset {
    /// Label for display: the name if present, otherwise the symbol, otherwise the id.
    pub fn label(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ if !self.symbol.is_empty() => &self.symbol,
            _ => &self.id,
        }
    }
}

impl AssetRecord for MarketAsset {
    fn current_price(&self) -> f64 {
        self.current_price
    }

    fn market_cap(&self) -> f64 {
        self.market_cap
    }

    fn total_volume(&self) -> f64 {
        self.total_volume
    }

    fn price_change_percentage_24h(&self) -> f64 {
        self.price_change_percentage_24h
    }

    fn market_cap_rank(&self) -> u32 {
        self.market_cap_rank
    }
}

/// Parse a JSON array of assets.
pub fn parse_assets(json: &str) -> Result<Vec<MarketAsset>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a JSON array of assets from disk.
pub fn load_assets(path: &Path) -> Result<Vec<MarketAsset>> {
    let content = fs::read_to_string(path)?;
    parse_assets(&content)
}

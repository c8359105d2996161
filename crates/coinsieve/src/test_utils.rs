use crate::asset::MarketAsset;
use std::collections::BTreeMap;

/// Builder for assets used across unit tests.
pub fn asset(id: &str) -> MarketAsset {
    MarketAsset {
        id: id.to_string(),
        symbol: id.to_string(),
        name: None,
        current_price: 1.0,
        market_cap: 1e9,
        total_volume: 1e6,
        price_change_percentage_24h: 0.0,
        market_cap_rank: 1,
        extra: BTreeMap::new(),
    }
}

pub fn priced(id: &str, price: f64) -> MarketAsset {
    MarketAsset {
        current_price: price,
        ..asset(id)
    }
}

pub fn capped(id: &str, market_cap: f64) -> MarketAsset {
    MarketAsset {
        market_cap,
        ..asset(id)
    }
}

pub fn with_volume(id: &str, total_volume: f64) -> MarketAsset {
    MarketAsset {
        total_volume,
        ..asset(id)
    }
}

pub fn changed(id: &str, change: f64) -> MarketAsset {
    MarketAsset {
        price_change_percentage_24h: change,
        ..asset(id)
    }
}

pub fn ranked(id: &str, rank: u32) -> MarketAsset {
    MarketAsset {
        market_cap_rank: rank,
        ..asset(id)
    }
}

pub fn ids(assets: &[MarketAsset]) -> Vec<&str> {
    assets.iter().map(|a| a.id.as_str()).collect()
}

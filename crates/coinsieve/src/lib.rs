//! # Coinsieve
//!
//! Persistent multi-criteria filters for market asset lists.
//!
//! A user picks filters along a fixed set of dimensions (price, market cap,
//! volume, 24h change, ranking and a few quick toggles). Coinsieve keeps those
//! choices in a [`FilterModel`], persists it after every change, and evaluates
//! it against any list of assets to produce the filtered view.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  UI client (CLI, app shell, ...)                             │
//! └──────────────────────────────────────────────────────────────┘
//!            │ setters                          │ apply(data)
//!            ▼                                  ▼
//! ┌──────────────────────────────┐   ┌───────────────────────────┐
//! │  FilterStore (filter_store)  │──▶│  Filter Engine (engine)   │
//! │  owns the current model      │   │  pure, stateless          │
//! └──────────────────────────────┘   └───────────────────────────┘
//!            │ load / save / clear
//!            ▼
//! ┌──────────────────────────────┐
//! │  FilterPersistence (store)   │
//! │  one key, JSON, best effort  │
//! └──────────────────────────────┘
//!            │ get_item / set_item / remove_item
//!            ▼
//! ┌──────────────────────────────┐
//! │  KeyValueStore: Fs / Mem     │
//! └──────────────────────────────┘
//! ```
//!
//! Nothing in this crate writes to stdout or stderr; diagnostics go through
//! the `log` facade and the binary decides where they end up.
//!
//! ## Quick Start
//!
//! ```ignore
//! use coinsieve::{FilterPersistence, FilterStore, MemBackend, QuickFilter};
//!
//! let mut store = FilterStore::open(FilterPersistence::new(MemBackend::new()));
//! store.update_price(Some(1.0), None);
//! store.toggle_quick_filter(QuickFilter::HighVolume);
//! let visible = store.apply(&assets);
//! ```

pub mod asset;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter_store;
pub mod init;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use asset::{load_assets, parse_assets, AssetRecord, MarketAsset};
pub use engine::{active_filters, apply, count_active, has_active, select};
pub use error::{Result, SieveError};
pub use filter_store::{FilterState, FilterStore};
pub use model::{
    ActiveFilter, ChangeKind, FilterModel, MarketCapCategory, QuickFilter, TopN, DEFAULT_MODEL,
};
pub use store::backend::KeyValueStore;
pub use store::fs_backend::FsBackend;
pub use store::mem_backend::MemBackend;
pub use store::persistence::FilterPersistence;
pub use store::FILTER_STORAGE_KEY;

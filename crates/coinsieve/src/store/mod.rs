//! # Storage Layer
//!
//! Filter preferences outlive the process, so the current [`FilterModel`] is
//! written to a durable key-value store after every change and read back when
//! a [`crate::filter_store::FilterStore`] starts.
//!
//! ## Layers
//!
//! 1. **[`backend::KeyValueStore`]**: raw `get_item` / `set_item` / `remove_item`
//!    on string keys. Knows nothing about filters.
//! 2. **[`persistence::FilterPersistence`]**: owns the single key
//!    [`FILTER_STORAGE_KEY`] and the JSON encoding of the model.
//!
//! ## Failure Policy
//!
//! Filters are a convenience, not critical data. The best-effort methods of
//! [`persistence::FilterPersistence`] never return errors:
//!
//! - **Read failure** (missing key, unreadable store, malformed JSON): the
//!   default model is returned.
//! - **Write failure**: logged. The caller keeps its in-memory model.
//! - **Clear failure**: logged.
//!
//! There is no schema versioning. A stored value that no longer matches the
//! model shape fails to parse and is treated like a corrupt value.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key in a data directory, written atomically.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O,
//!   with switches to simulate failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── coinsieve.toml            # Configuration (optional)
//! └── %40coinsieve%2Ffilters    # The filter model, as JSON
//! ```
//!
//! [`FilterModel`]: crate::model::FilterModel

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod persistence;

/// The key the filter model is stored under. No other component uses it.
pub const FILTER_STORAGE_KEY: &str = "@coinsieve/filters";

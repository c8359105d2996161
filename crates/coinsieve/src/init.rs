//! # Context Initialization
//!
//! Resolves where filters are persisted, loads configuration and opens the
//! [`FilterStore`].
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override` argument (the CLI's `--data`), used as-is.
//! 2. `COINSIEVE_DATA` environment variable (primarily for testing).
//! 3. The OS-appropriate data directory via the `directories` crate.
//!
//! ## Configuration Search
//!
//! `coinsieve.toml` is looked up in the data directory first and then in the
//! working directory; both are merged, the working directory winning.

use crate::config::SieveConfig;
use crate::error::{Result, SieveError};
use crate::filter_store::FilterStore;
use crate::store::fs_backend::FsBackend;
use crate::store::persistence::FilterPersistence;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use log::warn;
use std::path::{Path, PathBuf};

pub struct SieveContext {
    pub store: FilterStore<FsBackend>,
    pub config: SieveConfig,
    pub data_dir: PathBuf,
}

/// Pick the data directory, see the module docs for the order.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os("COINSIEVE_DATA") {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "coinsieve", "coinsieve")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SieveError::Config("Could not determine data directory".to_string()))
}

/// Load `coinsieve.toml` from `data_dir` and `cwd`. Falls back to defaults
/// when the files cannot be read.
pub fn load_config(data_dir: &Path, cwd: &Path) -> SieveConfig {
    let search_paths = vec![
        SearchPath::Path(data_dir.to_path_buf()),
        SearchPath::Path(cwd.to_path_buf()),
    ];

    match Clapfig::builder()
        .app_name("coinsieve")
        .file_name("coinsieve.toml")
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .load()
    {
        Ok(config) => config,
        Err(e) => {
            warn!("could not load configuration, using defaults: {}", e);
            SieveConfig::default()
        }
    }
}

/// Initialize the coinsieve context: data directory, configuration and a
/// hydrated filter store.
pub fn initialize(cwd: &Path, data_override: Option<PathBuf>) -> Result<SieveContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(&data_dir, cwd);

    let backend = FsBackend::new(data_dir.clone());
    let store = FilterStore::open(FilterPersistence::new(backend));

    Ok(SieveContext {
        store,
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FILTER_STORAGE_KEY;
    use tempfile::tempdir;

    #[test]
    fn override_wins_over_everything() {
        let dir = PathBuf::from("/somewhere/else");
        assert_eq!(resolve_data_dir(Some(dir.clone())).unwrap(), dir);
    }

    #[test]
    fn initialize_opens_hydrated_store() {
        let temp = tempdir().unwrap();
        let ctx = initialize(temp.path(), Some(temp.path().join("data"))).unwrap();

        assert!(!ctx.store.is_loading());
        assert!(!ctx.store.has_active());
        assert_eq!(ctx.data_dir, temp.path().join("data"));
        assert_eq!(ctx.config, SieveConfig::default());
    }

    #[test]
    fn initialize_reads_previous_session() {
        let temp = tempdir().unwrap();
        let data = temp.path().join("data");

        let mut first = initialize(temp.path(), Some(data.clone())).unwrap();
        first.store.update_price(Some(2.0), None);
        assert!(first.store.persistence().backend().item_path(FILTER_STORAGE_KEY).exists());

        let second = initialize(temp.path(), Some(data)).unwrap();
        assert_eq!(second.store.model().price.min, Some(2.0));
        assert!(second.store.has_active());
    }
}

use super::backend::KeyValueStore;
use super::FILTER_STORAGE_KEY;
use crate::error::Result;
use crate::model::{FilterModel, DEFAULT_MODEL};
use log::{debug, warn};

/// Loads and saves the [`FilterModel`] under [`FILTER_STORAGE_KEY`].
///
/// The `try_*` methods report failures as errors. The plain methods are the
/// best-effort layer used by the filter store: they log and degrade to the
/// default model (or to a no-op) instead of failing.
pub struct FilterPersistence<B: KeyValueStore> {
    backend: B,
}

impl<B: KeyValueStore> FilterPersistence<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the stored model. Returns Ok(None) when nothing is stored.
    pub fn try_load(&self) -> Result<Option<FilterModel>> {
        let Some(raw) = self.backend.get_item(FILTER_STORAGE_KEY)? else {
            return Ok(None);
        };
        let model = serde_json::from_str(&raw)?;
        Ok(Some(model))
    }

    pub fn try_save(&self, model: &FilterModel) -> Result<()> {
        let content = serde_json::to_string(model)?;
        self.backend.set_item(FILTER_STORAGE_KEY, &content)
    }

    pub fn try_clear(&self) -> Result<()> {
        self.backend.remove_item(FILTER_STORAGE_KEY)
    }

    /// The stored model, or [`DEFAULT_MODEL`] if it is absent, unreadable or
    /// does not parse.
    pub fn load(&self) -> FilterModel {
        match self.try_load() {
            Ok(Some(model)) => {
                debug!("loaded filter model from '{}'", FILTER_STORAGE_KEY);
                model
            }
            Ok(None) => {
                debug!("no stored filter model, using defaults");
                DEFAULT_MODEL
            }
            Err(e) => {
                warn!("failed to load filter model, using defaults: {}", e);
                DEFAULT_MODEL
            }
        }
    }

    /// Persist `model`. Returns whether the write went through; a failure is
    /// logged and otherwise ignored.
    pub fn save(&self, model: &FilterModel) -> bool {
        match self.try_save(model) {
            Ok(()) => {
                debug!("saved filter model to '{}'", FILTER_STORAGE_KEY);
                true
            }
            Err(e) => {
                warn!("failed to save filter model: {}", e);
                false
            }
        }
    }

    /// Remove the stored model. Returns whether the removal went through.
    pub fn clear(&self) -> bool {
        match self.try_clear() {
            Ok(()) => {
                debug!("cleared filter model at '{}'", FILTER_STORAGE_KEY);
                true
            }
            Err(e) => {
                warn!("failed to clear filter model: {}", e);
                false
            }
        }
    }
}

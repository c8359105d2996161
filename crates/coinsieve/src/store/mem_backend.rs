use super::backend::KeyValueStore;
use crate::error::{Result, SieveError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the filter store is
/// single-threaded. This keeps every [`KeyValueStore`] method on `&self`.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
    simulate_remove_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Enable remove error simulation for testing error handling.
    pub fn set_simulate_remove_error(&self, simulate: bool) {
        self.simulate_remove_error.set(simulate);
    }

    /// Test helper to plant a raw value, bypassing any serialization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Raw value currently held under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Number of successful `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(SieveError::Store("Simulated read error".to_string()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(SieveError::Store("Simulated write error".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if self.simulate_remove_error.get() {
            return Err(SieveError::Store("Simulated remove error".to_string()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let backend = MemBackend::new();
        assert_eq!(backend.get_item("k").unwrap(), None);

        backend.set_item("k", "v1").unwrap();
        backend.set_item("k", "v2").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), Some("v2".to_string()));
        assert_eq!(backend.write_count(), 2);

        backend.remove_item("k").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), None);
        backend.remove_item("k").unwrap();
    }

    #[test]
    fn simulated_errors() {
        let backend = MemBackend::new();
        backend.insert_raw("k", "v");

        backend.set_simulate_read_error(true);
        assert!(backend.get_item("k").is_err());

        backend.set_simulate_write_error(true);
        assert!(backend.set_item("k", "other").is_err());
        assert_eq!(backend.raw("k"), Some("v".to_string()));
        assert_eq!(backend.write_count(), 0);

        backend.set_simulate_remove_error(true);
        assert!(backend.remove_item("k").is_err());
        assert_eq!(backend.raw("k"), Some("v".to_string()));
    }
}

use crate::error::Result;

/// Abstract interface for the durable key-value store.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::persistence::FilterPersistence`] handles the "what" (which key,
/// what shape, and what to do when the store misbehaves).
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if the key is absent.
    /// Returns Err only on actual storage errors (permissions, disk failure).
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

use super::backend::KeyValueStore;
use crate::error::{Result, SieveError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem storage backend: one file per key under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file that holds `key`.
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(item_filename(key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SieveError::Io)?;
        }
        Ok(())
    }
}

/// Map a key to a file name. Anything outside `[A-Za-z0-9._-]` is
/// percent-escaped so namespaced keys like `@app/filters` stay flat.
fn item_filename(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                name.push(byte as char)
            }
            _ => name.push_str(&format!("%{:02X}", byte)),
        }
    }
    // "." and ".." would resolve to directories
    if name.bytes().all(|b| b == b'.') {
        name = name.replace('.', "%2E");
    }
    name
}

impl KeyValueStore for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.item_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SieveError::Io(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(SieveError::Store("Empty storage key".to_string()));
        }
        self.ensure_dir()?;

        // Atomic Write
        let tmp_path = self.root.join(format!(".item-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(SieveError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, self.item_path(key)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(SieveError::Io(e));
        }

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SieveError::Io(e)),
        }
    }
}

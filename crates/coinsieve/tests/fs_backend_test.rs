use coinsieve::store::backend::KeyValueStore;
use coinsieve::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("store"));
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_item_io() {
    let (_dir, backend) = setup();

    // 1. Missing
    assert_eq!(backend.get_item("filters").unwrap(), None);

    // 2. Write + Read
    backend.set_item("filters", "{\"a\":1}").unwrap();
    assert_eq!(
        backend.get_item("filters").unwrap(),
        Some("{\"a\":1}".to_string())
    );

    // 3. Overwrite
    backend.set_item("filters", "{}").unwrap();
    assert_eq!(backend.get_item("filters").unwrap(), Some("{}".to_string()));

    // 4. Remove, twice
    backend.remove_item("filters").unwrap();
    backend.remove_item("filters").unwrap();
    assert_eq!(backend.get_item("filters").unwrap(), None);
}

#[test]
fn test_fs_backend_creates_root_lazily() {
    let (dir, backend) = setup();
    assert!(!dir.path().join("store").exists());

    backend.set_item("k", "v").unwrap();
    assert!(dir.path().join("store").is_dir());
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, backend) = setup();
    backend.set_item("@coinsieve/filters", "Atomic").unwrap();

    let expected_path = backend.root().join("%40coinsieve%2Ffilters");
    assert!(expected_path.exists());
    assert_eq!(fs::read_to_string(&expected_path).unwrap(), "Atomic");

    // Verify NO .tmp files are left behind
    for entry in fs::read_dir(backend.root()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_keys_are_independent() {
    let (_dir, backend) = setup();
    backend.set_item("a/b", "1").unwrap();
    backend.set_item("a_b", "2").unwrap();

    assert_eq!(backend.get_item("a/b").unwrap(), Some("1".to_string()));
    assert_eq!(backend.get_item("a_b").unwrap(), Some("2".to_string()));
}

#[test]
fn test_fs_backend_rejects_empty_key() {
    let (_dir, backend) = setup();
    assert!(backend.set_item("", "v").is_err());
}

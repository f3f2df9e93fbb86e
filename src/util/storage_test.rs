use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("token"), None);

    storage.set("token", "abc123").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("abc123"));

    storage.remove("token").unwrap();
    assert_eq!(storage.get("token"), None);
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_clones_share_slots() {
    let storage = MemoryStorage::new();
    let reloaded = storage.clone();
    storage.set("lang", "zh").unwrap();
    assert_eq!(reloaded.get("lang").as_deref(), Some("zh"));
}

#[test]
fn removing_missing_slot_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove("user").is_ok());
}

#[test]
fn read_only_storage_rejects_writes() {
    let storage = MemoryStorage::read_only();
    assert!(matches!(storage.set("token", "x"), Err(StorageError::Write(_))));
    assert!(matches!(storage.remove("token"), Err(StorageError::Write(_))));
    assert_eq!(storage.get("token"), None);
}

#[test]
fn with_entries_seeds_slots() {
    let storage = MemoryStorage::with_entries(&[("token", "t"), ("user", "{}")]);
    assert_eq!(storage.get("token").as_deref(), Some("t"));
    assert_eq!(storage.get("user").as_deref(), Some("{}"));
}

#[cfg(not(feature = "csr"))]
#[test]
fn local_storage_is_unavailable_outside_the_browser() {
    let storage = LocalStorage;
    assert_eq!(storage.get("token"), None);
    assert_eq!(storage.set("token", "x"), Err(StorageError::Unavailable));
}

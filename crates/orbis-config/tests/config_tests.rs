#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Config service over the memory and filesystem stores.

use orbis_config::{ConfigError, ConfigService, ConfigStore, FsConfigStore, MemoryConfigStore};
use orbis_entity::{CollisionConfig, CollisionRules, ScanClass};

#[test]
fn missing_key_loads_as_none_or_default() {
    let service = ConfigService::new(MemoryConfigStore::new());
    let loaded: Option<CollisionConfig> = service.load("collision").expect("load");
    assert!(loaded.is_none());
    let cfg: CollisionConfig = service.load_or_default("collision").expect("load");
    assert_eq!(cfg, CollisionConfig::default());
}

#[test]
fn memory_store_round_trips_collision_config() {
    let service = ConfigService::new(MemoryConfigStore::new());
    let cfg = CollisionConfig {
        max_entities: 64,
        rules: CollisionRules::default().with_immune_pair(ScanClass::Police, ScanClass::Station),
        ..CollisionConfig::default()
    };
    service.save("collision", &cfg).expect("save");
    let back: CollisionConfig = service.load_or_default("collision").expect("load");
    assert_eq!(back, cfg);
    assert_eq!(service.store().len(), 1);
}

#[test]
fn empty_blob_counts_as_missing() {
    let store = MemoryConfigStore::new();
    store.save_raw("collision", b"").expect("save");
    let service = ConfigService::new(store);
    let loaded: Option<CollisionConfig> = service.load("collision").expect("load");
    assert!(loaded.is_none());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let store = MemoryConfigStore::new();
    store.save_raw("collision", b"{ not json").expect("save");
    let service = ConfigService::new(store);
    let err = service.load::<CollisionConfig>("collision").expect_err("malformed");
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn fs_store_writes_one_file_per_key() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().join("nested");
    let store = FsConfigStore::at(&dir).expect("store");
    let service = ConfigService::new(store);
    let cfg = CollisionConfig { max_owner_depth: 3, ..CollisionConfig::default() };
    service.save("collision", &cfg).expect("save");
    assert!(dir.join("collision.json").is_file());

    let reopened = ConfigService::new(FsConfigStore::at(&dir).expect("store"));
    let back: CollisionConfig = reopened.load_or_default("collision").expect("load");
    assert_eq!(back, cfg);
    assert!(reopened.load::<CollisionConfig>("other").expect("load").is_none());
}

#[test]
fn fs_store_rejects_escaping_keys() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = FsConfigStore::at(tmp.path()).expect("store");
    assert!(matches!(store.save_raw("../outside", b"{}"), Err(ConfigError::InvalidKey(_))));
    assert!(matches!(store.load_raw("a/b"), Err(ConfigError::InvalidKey(_))));
    assert_eq!(store.base(), tmp.path());
}

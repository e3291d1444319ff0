use super::*;

struct BrokenStore;

impl ProjectStore for BrokenStore {
    fn load(&self, _key: &str) -> ShotframeResult<Option<String>> {
        Err(ShotframeError::persistence("offline"))
    }

    fn save(&mut self, _key: &str, _value: &str) -> ShotframeResult<()> {
        Err(ShotframeError::persistence("offline"))
    }
}

#[test]
fn memory_store_round_trip() {
    let mut a = PersistenceAdapter::new(MemoryStore::new());
    let mut p = Project::new();
    p.add_image("x", None);
    assert!(a.save_project("proj", &p));
    let loaded = a.load_project("proj").unwrap();
    assert!(!loaded.migrated);
    assert_eq!(loaded.project, p);
    assert!(a.load_project("other").is_none());
}

#[test]
fn broken_store_degrades_quietly() {
    let mut a = PersistenceAdapter::new(BrokenStore);
    assert!(a.load_project("proj").is_none());
    assert!(!a.save_project("proj", &Project::new()));
}

#[test]
fn unreadable_payload_loads_as_nothing() {
    let mut store = MemoryStore::new();
    store.save("proj", "{\"version\": 42}").unwrap();
    let a = PersistenceAdapter::new(store);
    assert!(a.load_project("proj").is_none());
}

#[test]
fn legacy_payload_reports_migration() {
    let mut store = MemoryStore::new();
    store.save("proj", "{\"images\": [{\"name\": \"a\"}]}").unwrap();
    let loaded = PersistenceAdapter::new(store).load_project("proj").unwrap();
    assert!(loaded.migrated);
    assert_eq!(loaded.project.images.len(), 1);
}

#[test]
fn dir_store_rejects_path_like_keys() {
    let s = DirStore::new(std::env::temp_dir());
    assert!(s.load("../etc").is_err());
    assert!(s.load("").is_err());
    assert!(s.load(".hidden").is_err());
}

#[test]
fn dir_store_round_trip() {
    let root = std::env::temp_dir().join(format!("shotframe-store-{}", std::process::id()));
    let mut s = DirStore::new(&root);
    assert_eq!(s.load("p1").unwrap(), None);
    s.save("p1", "{}").unwrap();
    assert_eq!(s.load("p1").unwrap().as_deref(), Some("{}"));
    let _ = std::fs::remove_dir_all(&root);
}

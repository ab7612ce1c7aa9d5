use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::store::TermStore;
use crate::core::types::Term;

pub const TERMS_KEY: &str = "terms";
pub const BLACKLIST_KEY: &str = "blacklist";

/// Synchronous key-value persistence. Each key holds one JSON document.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// A `KvStore` keeping one `<key>.json` file per key under a directory.
///
/// Writes land in a temp file first and are renamed into place, so a
/// crash mid-write never leaves a half-written document behind.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for DirStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.persist(self.key_path(key))?;
        Ok(())
    }
}

/// In-memory `KvStore` for tests.
#[derive(Default)]
pub struct MemStore {
    entries: HashMap<String, String>,
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads a store from the two persisted keys. An absent key leaves the
/// corresponding structure empty; an unreadable one does too, since a
/// fresh session beats refusing to start.
pub fn load_store(kv: &impl KvStore) -> TermStore {
    let terms: Vec<Term> = match kv.get(TERMS_KEY) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored terms unreadable, starting empty");
            Vec::new()
        }),
        None => Vec::new(),
    };
    // Duplicates in the stored array collapse via set semantics.
    let blacklist: HashSet<String> = match kv.get(BLACKLIST_KEY) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored blacklist unreadable, starting empty");
            HashSet::new()
        }),
        None => HashSet::new(),
    };
    TermStore::from_parts(terms, blacklist)
}

/// Writes both keys back. Called after every mutation.
pub fn save_store(store: &TermStore, kv: &mut impl KvStore) -> io::Result<()> {
    let terms = serde_json::to_string(store.terms())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let blacklist = serde_json::to_string(store.blacklist())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    kv.set(TERMS_KEY, &terms)?;
    kv.set(BLACKLIST_KEY, &blacklist)?;
    Ok(())
}

/// Default per-user data directory for the binary.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("term-roulette")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_load_as_empty_store() {
        let store = load_store(&MemStore::default());
        assert!(store.terms().is_empty());
        assert!(store.blacklist().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_state() {
        let mut store = TermStore::new();
        store.add_term("Pizza", "Food").unwrap();
        store.add_term("Chess", "Games").unwrap();
        store.toggle_blacklist("Chess");

        let mut kv = MemStore::default();
        save_store(&store, &mut kv).unwrap();

        let loaded = load_store(&kv);
        assert_eq!(loaded.terms(), store.terms());
        assert!(loaded.is_blacklisted("Chess"));
        assert!(!loaded.is_blacklisted("Pizza"));
    }

    #[test]
    fn duplicate_blacklist_entries_collapse_on_load() {
        let mut kv = MemStore::default();
        kv.set(BLACKLIST_KEY, r#"["Pizza","Pizza","Chess"]"#).unwrap();
        let store = load_store(&kv);
        assert_eq!(store.blacklist().len(), 2);
    }

    #[test]
    fn corrupt_terms_document_falls_back_to_empty() {
        let mut kv = MemStore::default();
        kv.set(TERMS_KEY, "{not json").unwrap();
        kv.set(BLACKLIST_KEY, r#"["Pizza"]"#).unwrap();
        let store = load_store(&kv);
        assert!(store.terms().is_empty());
        assert!(store.is_blacklisted("Pizza"));
    }

    #[test]
    fn dir_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TermStore::new();
        store.add_term("Pizza", "Food").unwrap();

        let mut kv = DirStore::new(dir.path());
        save_store(&store, &mut kv).unwrap();
        assert!(dir.path().join("terms.json").exists());

        let reopened = DirStore::new(dir.path());
        let loaded = load_store(&reopened);
        assert_eq!(loaded.terms(), store.terms());
    }
}

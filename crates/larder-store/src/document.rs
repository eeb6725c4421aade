//! Flat-file JSON document store.
//!
//! One durable file per named collection: `{data_dir}/{collection}.json`,
//! holding a JSON array of self-describing records. The store favors
//! availability over strict error surfacing on the read path — an absent,
//! unreadable, or unparsable file loads as an empty collection and the
//! failure is logged. The write path is strict and atomic: the new content
//! is written to a temporary file, synced, then renamed over the old file,
//! so a crash or concurrent reader never observes a partial write.
//!
//! Repositories follow a load-entire → mutate → save-entire pattern. That
//! pattern loses updates under concurrent writers, so every mutating
//! operation must hold the collection's lock (see [`DocumentStore::collection_lock`])
//! around the whole sequence.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};

/// Named-collection JSON store rooted at a data directory.
pub struct DocumentStore {
    data_dir: PathBuf,
    /// Per-collection write locks, created lazily per collection name.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DocumentStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::WriteFailed {
            collection: data_dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            data_dir,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// The directory this store reads and writes.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of a collection's backing file.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    /// The mutual-exclusion lock for a collection.
    ///
    /// Mutating repository operations hold this around their whole
    /// load-mutate-save sequence; without it, two concurrent writers to the
    /// same collection would each save their own loaded copy and one update
    /// would vanish.
    pub fn collection_lock(&self, collection: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(collection.to_string())
            .or_default()
            .clone()
    }

    /// Load every record in a collection.
    ///
    /// Returns an empty vec when the backing file is absent, unreadable, or
    /// fails to parse. Failures are logged, not raised.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Vec::new();
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!(collection, error = %err, "failed to read collection, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(collection, error = %err, "failed to parse collection, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace a collection's entire content.
    ///
    /// Atomic: writes to `{collection}.json.tmp`, syncs, then renames over
    /// the live file. On failure the prior content is left intact.
    pub fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<()> {
        let body = serde_json::to_string_pretty(records)?;
        let path = self.collection_path(collection);
        let tmp = self.data_dir.join(format!("{collection}.json.tmp"));

        write_atomic(&tmp, &path, body.as_bytes()).map_err(|source| StoreError::WriteFailed {
            collection: collection.to_string(),
            source,
        })?;

        tracing::debug!(collection, records = records.len(), "collection saved");
        Ok(())
    }

    /// Allocate the next record id for a collection.
    ///
    /// 1 for an empty collection, otherwise `max(existing ids) + 1`. Max-based
    /// rather than count-based: ids are never reused after deletions.
    pub fn allocate_next_id(&self, collection: &str) -> u64 {
        let records: Vec<serde_json::Value> = self.load(collection);
        records
            .iter()
            .filter_map(|record| record.get("id").and_then(serde_json::Value::as_u64))
            .max()
            .map_or(1, |max| max + 1)
    }
}

/// Write `body` to `tmp`, sync it, then rename over `path`.
fn write_atomic(tmp: &Path, path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(body)?;
    // Data must reach disk before the rename makes it visible.
    file.sync_all()?;
    fs::rename(tmp, path)
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: u64,
        name: String,
    }

    fn temp_store() -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_load_absent_collection_is_empty() {
        let (_dir, store) = temp_store();
        let records: Vec<Record> = store.load("missing");
        assert!(records.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, store) = temp_store();
        let records = vec![
            Record {
                id: 1,
                name: "salt".to_string(),
            },
            Record {
                id: 2,
                name: "pepper".to_string(),
            },
        ];

        store.save("spices", &records).unwrap();
        let loaded: Vec<Record> = store.load("spices");
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_save_replaces_whole_collection() {
        let (_dir, store) = temp_store();
        let first = vec![Record {
            id: 1,
            name: "a".to_string(),
        }];
        let second = vec![Record {
            id: 2,
            name: "b".to_string(),
        }];

        store.save("items", &first).unwrap();
        store.save("items", &second).unwrap();

        let loaded: Vec<Record> = store.load("items");
        assert_eq!(loaded, second);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (dir, store) = temp_store();
        store
            .save(
                "items",
                &[Record {
                    id: 1,
                    name: "a".to_string(),
                }],
            )
            .unwrap();
        assert!(!dir.path().join("items.json.tmp").exists());
    }

    #[test]
    fn test_unparsable_collection_loads_empty() {
        let (dir, store) = temp_store();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();

        let records: Vec<Record> = store.load("broken");
        assert!(records.is_empty());
    }

    #[test]
    fn test_allocate_next_id_empty_collection() {
        let (_dir, store) = temp_store();
        assert_eq!(store.allocate_next_id("fresh"), 1);
    }

    #[test]
    fn test_allocate_next_id_is_max_based() {
        let (_dir, store) = temp_store();
        let records = vec![
            Record {
                id: 1,
                name: "a".to_string(),
            },
            Record {
                id: 3,
                name: "b".to_string(),
            },
            Record {
                id: 5,
                name: "c".to_string(),
            },
        ];
        store.save("items", &records).unwrap();

        // Not count + 1: gaps from deletions must never cause id reuse.
        assert_eq!(store.allocate_next_id("items"), 6);
    }

    #[test]
    fn test_collection_lock_is_shared_per_name() {
        let (_dir, store) = temp_store();
        let a = store.collection_lock("recipes");
        let b = store.collection_lock("recipes");
        let other = store.collection_lock("pantry_items");

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &other));
    }
}

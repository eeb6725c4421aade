//! Pantry repository with skip-if-exists bulk adds.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use larder_types::{NewPantryItem, PantryItem, PantryItemKind};

use crate::document::DocumentStore;
use crate::error::{Result, StoreError};

const COLLECTION: &str = "pantry_items";

/// Repository for the `pantry_items` collection.
#[derive(Debug, Clone)]
pub struct PantryStore {
    store: Arc<DocumentStore>,
}

impl PantryStore {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Add a batch of pantry items for the owner, skipping any whose
    /// (name, kind) already exists. Returns the count actually added.
    pub fn add_items(&self, owner_id: u64, items: Vec<NewPantryItem>) -> Result<usize> {
        if items.is_empty() {
            return Err(StoreError::missing_field("pantry item", "items"));
        }
        if items.iter().any(|item| item.name.trim().is_empty()) {
            return Err(StoreError::missing_field("pantry item", "name"));
        }

        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let mut all: Vec<PantryItem> = self.store.load(COLLECTION);
        let mut keys: HashSet<(String, PantryItemKind)> = all
            .iter()
            .filter(|item| item.owner_id == owner_id)
            .map(|item| (item.name.clone(), item.kind))
            .collect();

        // Ids allocated from the in-memory max so a batch never repeats one.
        let mut next_id = all.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        let mut added = 0;
        for item in items {
            let key = (item.name.clone(), item.kind);
            if !keys.insert(key) {
                continue;
            }
            all.push(PantryItem {
                id: next_id,
                owner_id,
                name: item.name,
                kind: item.kind,
                quantity: item.quantity,
                created_at: Utc::now(),
            });
            next_id += 1;
            added += 1;
        }

        if added > 0 {
            self.store.save(COLLECTION, &all)?;
        }
        tracing::debug!(owner_id, added, "pantry items added");
        Ok(added)
    }

    /// The owner's pantry, optionally narrowed to one kind.
    pub fn list(&self, owner_id: u64, kind: Option<PantryItemKind>) -> Vec<PantryItem> {
        self.store
            .load::<PantryItem>(COLLECTION)
            .into_iter()
            .filter(|item| item.owner_id == owner_id)
            .filter(|item| kind.is_none_or(|kind| item.kind == kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_repo() -> (tempfile::TempDir, PantryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DocumentStore::new(dir.path()).unwrap());
        (dir, PantryStore::new(store))
    }

    fn item(name: &str, kind: PantryItemKind) -> NewPantryItem {
        NewPantryItem {
            name: name.to_string(),
            kind,
            quantity: None,
        }
    }

    #[test]
    fn test_bulk_add_skips_existing_keys() {
        let (_dir, repo) = temp_repo();
        repo.add_items(1, vec![item("Salt", PantryItemKind::Seasoning)])
            .unwrap();

        let added = repo
            .add_items(
                1,
                vec![
                    item("Salt", PantryItemKind::Seasoning),
                    item("Pepper", PantryItemKind::Seasoning),
                ],
            )
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(repo.list(1, None).len(), 2);
    }

    #[test]
    fn test_bulk_add_dedups_within_batch() {
        let (_dir, repo) = temp_repo();
        let added = repo
            .add_items(
                1,
                vec![
                    item("Salt", PantryItemKind::Seasoning),
                    item("Salt", PantryItemKind::Seasoning),
                ],
            )
            .unwrap();

        assert_eq!(added, 1);
    }

    #[test]
    fn test_same_name_different_kind_both_kept() {
        let (_dir, repo) = temp_repo();
        let added = repo
            .add_items(
                1,
                vec![
                    item("Ginger", PantryItemKind::Seasoning),
                    item("Ginger", PantryItemKind::Ingredient),
                ],
            )
            .unwrap();

        assert_eq!(added, 2);
    }

    #[test]
    fn test_batch_assigns_distinct_ids() {
        let (_dir, repo) = temp_repo();
        repo.add_items(
            1,
            vec![
                item("Salt", PantryItemKind::Seasoning),
                item("Pepper", PantryItemKind::Seasoning),
                item("Rice", PantryItemKind::Ingredient),
            ],
        )
        .unwrap();

        let mut ids: Vec<u64> = repo.list(1, None).iter().map(|i| i.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_list_filters_by_kind() {
        let (_dir, repo) = temp_repo();
        repo.add_items(
            1,
            vec![
                item("Salt", PantryItemKind::Seasoning),
                item("Rice", PantryItemKind::Ingredient),
            ],
        )
        .unwrap();

        let seasonings = repo.list(1, Some(PantryItemKind::Seasoning));
        assert_eq!(seasonings.len(), 1);
        assert_eq!(seasonings[0].name, "Salt");
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let (_dir, repo) = temp_repo();
        let err = repo.add_items(1, vec![]).unwrap_err();
        assert!(matches!(err, StoreError::MissingField { .. }));
    }
}

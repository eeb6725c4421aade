//! User ingredient repository: the names the user has picked for recipe
//! matching, deduplicated per owner.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use larder_types::UserIngredient;

use crate::document::DocumentStore;
use crate::error::{Result, StoreError};

const COLLECTION: &str = "user_ingredients";

/// Repository for the `user_ingredients` collection.
#[derive(Debug, Clone)]
pub struct IngredientStore {
    store: Arc<DocumentStore>,
}

impl IngredientStore {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Add ingredient names for the owner, skipping names the owner already
    /// has (and repeats within the batch). Returns the count actually added.
    pub fn add_names(&self, owner_id: u64, names: Vec<String>) -> Result<usize> {
        if names.is_empty() {
            return Err(StoreError::missing_field("user ingredient", "names"));
        }

        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let mut all: Vec<UserIngredient> = self.store.load(COLLECTION);
        let mut existing: HashSet<String> = all
            .iter()
            .filter(|item| item.owner_id == owner_id)
            .map(|item| item.name.clone())
            .collect();

        let mut next_id = all.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        let mut added = 0;
        for name in names {
            if name.trim().is_empty() || !existing.insert(name.clone()) {
                continue;
            }
            all.push(UserIngredient {
                id: next_id,
                owner_id,
                name,
                created_at: Utc::now(),
            });
            next_id += 1;
            added += 1;
        }

        if added > 0 {
            self.store.save(COLLECTION, &all)?;
        }
        tracing::debug!(owner_id, added, "user ingredients added");
        Ok(added)
    }

    /// The owner's ingredients, newest first.
    pub fn list(&self, owner_id: u64) -> Vec<UserIngredient> {
        let mut items: Vec<UserIngredient> = self
            .store
            .load::<UserIngredient>(COLLECTION)
            .into_iter()
            .filter(|item| item.owner_id == owner_id)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    /// Delete the owner's ingredient with this id.
    pub fn delete(&self, id: u64, owner_id: u64) -> Result<()> {
        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let mut items: Vec<UserIngredient> = self.store.load(COLLECTION);
        let before = items.len();
        items.retain(|item| !(item.id == id && item.owner_id == owner_id));

        if items.len() == before {
            return Err(StoreError::not_found("user ingredient", id));
        }
        self.store.save(COLLECTION, &items)?;
        Ok(())
    }

    /// Remove every ingredient the owner has, returning the count removed.
    /// Other owners' records are untouched.
    pub fn clear(&self, owner_id: u64) -> Result<usize> {
        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let mut items: Vec<UserIngredient> = self.store.load(COLLECTION);
        let before = items.len();
        items.retain(|item| item.owner_id != owner_id);
        let removed = before - items.len();

        self.store.save(COLLECTION, &items)?;
        tracing::debug!(owner_id, removed, "user ingredients cleared");
        Ok(removed)
    }
}

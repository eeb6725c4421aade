//! Singleton-per-owner preference repositories: the user's location and
//! their recipe filter. An upsert replaces any existing record for the
//! owner, so at most one live record per owner ever exists.

use std::sync::Arc;

use chrono::Utc;
use larder_types::{NewRecipeFilter, RecipeFilter, UserLocation};

use crate::document::DocumentStore;
use crate::error::{Result, StoreError};

const LOCATIONS: &str = "user_locations";
const FILTERS: &str = "recipe_filters";

/// Repository for the `user_locations` collection.
#[derive(Debug, Clone)]
pub struct LocationStore {
    store: Arc<DocumentStore>,
}

impl LocationStore {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Set the owner's location, replacing any previous record.
    pub fn set(&self, owner_id: u64, location: impl Into<String>) -> Result<UserLocation> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(StoreError::missing_field("user location", "location"));
        }

        let lock = self.store.collection_lock(LOCATIONS);
        let _guard = lock.lock();

        let mut records: Vec<UserLocation> = self.store.load(LOCATIONS);
        records.retain(|record| record.owner_id != owner_id);

        // Allocated before the save, so the replaced record's id still
        // counts toward the max and is never reused.
        let record = UserLocation {
            id: self.store.allocate_next_id(LOCATIONS),
            owner_id,
            location,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        self.store.save(LOCATIONS, &records)?;

        tracing::debug!(owner_id, location = %record.location, "location set");
        Ok(record)
    }

    /// The owner's current location, if set.
    pub fn get(&self, owner_id: u64) -> Option<UserLocation> {
        self.store
            .load::<UserLocation>(LOCATIONS)
            .into_iter()
            .find(|record| record.owner_id == owner_id)
    }
}

/// Repository for the `recipe_filters` collection.
#[derive(Debug, Clone)]
pub struct FilterStore {
    store: Arc<DocumentStore>,
}

impl FilterStore {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Set the owner's filter preferences, replacing any previous record.
    pub fn set(&self, owner_id: u64, input: NewRecipeFilter) -> Result<RecipeFilter> {
        if input.cooking_time.trim().is_empty() {
            return Err(StoreError::missing_field("recipe filter", "cooking_time"));
        }

        let lock = self.store.collection_lock(FILTERS);
        let _guard = lock.lock();

        let mut records: Vec<RecipeFilter> = self.store.load(FILTERS);
        records.retain(|record| record.owner_id != owner_id);

        let record = RecipeFilter {
            id: self.store.allocate_next_id(FILTERS),
            owner_id,
            cooking_time: input.cooking_time,
            is_packable: input.is_packable,
            is_induction: input.is_induction,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        self.store.save(FILTERS, &records)?;

        tracing::debug!(owner_id, "recipe filter set");
        Ok(record)
    }

    /// The owner's current filter preferences, if set.
    pub fn get(&self, owner_id: u64) -> Option<RecipeFilter> {
        self.store
            .load::<RecipeFilter>(FILTERS)
            .into_iter()
            .find(|record| record.owner_id == owner_id)
    }
}

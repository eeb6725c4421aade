//! Hometown recipe repository: the dishes the user grew up with, kept as a
//! feed separate from everyday recipes.

use std::sync::Arc;

use chrono::Utc;
use larder_types::{HometownRecipe, NewHometownRecipe};

use crate::document::DocumentStore;
use crate::error::{Result, StoreError};

const COLLECTION: &str = "hometown_recipes";

/// Repository for the `hometown_recipes` collection.
#[derive(Debug, Clone)]
pub struct HometownStore {
    store: Arc<DocumentStore>,
}

impl HometownStore {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Add a hometown recipe. Requires a non-empty name and at least one
    /// ingredient and one step.
    pub fn add(&self, owner_id: u64, input: NewHometownRecipe) -> Result<HometownRecipe> {
        if input.name.trim().is_empty() {
            return Err(StoreError::missing_field("hometown recipe", "name"));
        }
        if input.ingredients.is_empty() {
            return Err(StoreError::missing_field("hometown recipe", "ingredients"));
        }
        if input.steps.is_empty() {
            return Err(StoreError::missing_field("hometown recipe", "steps"));
        }

        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let mut recipes: Vec<HometownRecipe> = self.store.load(COLLECTION);
        let recipe = HometownRecipe {
            id: self.store.allocate_next_id(COLLECTION),
            owner_id,
            name: input.name,
            ingredients: input.ingredients,
            steps: input.steps,
            created_at: Utc::now(),
        };
        recipes.push(recipe.clone());
        self.store.save(COLLECTION, &recipes)?;

        tracing::debug!(id = recipe.id, owner_id, "hometown recipe added");
        Ok(recipe)
    }

    /// The owner's hometown recipes, newest first.
    pub fn list(&self, owner_id: u64) -> Vec<HometownRecipe> {
        let mut recipes: Vec<HometownRecipe> = self
            .store
            .load::<HometownRecipe>(COLLECTION)
            .into_iter()
            .filter(|recipe| recipe.owner_id == owner_id)
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recipes
    }

    /// Delete the owner's recipe with this id.
    pub fn delete(&self, id: u64, owner_id: u64) -> Result<()> {
        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let mut recipes: Vec<HometownRecipe> = self.store.load(COLLECTION);
        let before = recipes.len();
        recipes.retain(|recipe| !(recipe.id == id && recipe.owner_id == owner_id));

        if recipes.len() == before {
            return Err(StoreError::not_found("hometown recipe", id));
        }
        self.store.save(COLLECTION, &recipes)?;

        tracing::debug!(id, owner_id, "hometown recipe deleted");
        Ok(())
    }
}

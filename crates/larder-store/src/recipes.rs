//! Recipe repository: manual and AI-generated recipes share one collection,
//! distinguished by [`RecipeSource`].

use std::sync::Arc;

use chrono::Utc;
use larder_types::{NewRecipe, Recipe, RecipeSource};

use crate::document::DocumentStore;
use crate::error::{Result, StoreError};

const COLLECTION: &str = "recipes";

/// Limit on ingredient-match recommendations.
const MAX_RECOMMENDATIONS: usize = 10;

/// Repository for the `recipes` collection.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    store: Arc<DocumentStore>,
}

impl RecipeStore {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Add a recipe for the owner. Requires a non-empty name and at least
    /// one ingredient and one step.
    ///
    /// AI-generated recipes persist through the same path with
    /// [`RecipeSource::Ai`].
    pub fn add(&self, owner_id: u64, input: NewRecipe, source: RecipeSource) -> Result<Recipe> {
        if input.name.trim().is_empty() {
            return Err(StoreError::missing_field("recipe", "name"));
        }
        if input.ingredients.is_empty() {
            return Err(StoreError::missing_field("recipe", "ingredients"));
        }
        if input.steps.is_empty() {
            return Err(StoreError::missing_field("recipe", "steps"));
        }

        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let mut recipes: Vec<Recipe> = self.store.load(COLLECTION);
        let recipe = Recipe {
            id: self.store.allocate_next_id(COLLECTION),
            owner_id,
            name: input.name,
            ingredients: input.ingredients,
            steps: input.steps,
            source,
            created_at: Utc::now(),
        };
        recipes.push(recipe.clone());
        self.store.save(COLLECTION, &recipes)?;

        tracing::debug!(id = recipe.id, owner_id, source = %recipe.source, "recipe added");
        Ok(recipe)
    }

    /// All recipes belonging to the owner.
    pub fn list(&self, owner_id: u64) -> Vec<Recipe> {
        self.store
            .load::<Recipe>(COLLECTION)
            .into_iter()
            .filter(|recipe| recipe.owner_id == owner_id)
            .collect()
    }

    /// Recipes sharing at least one ingredient with `ingredients`, capped at
    /// ten matches.
    pub fn recommend(&self, owner_id: u64, ingredients: &[String]) -> Vec<Recipe> {
        if ingredients.is_empty() {
            return Vec::new();
        }

        self.store
            .load::<Recipe>(COLLECTION)
            .into_iter()
            .filter(|recipe| recipe.owner_id == owner_id)
            .filter(|recipe| {
                recipe
                    .ingredients
                    .iter()
                    .any(|have| ingredients.contains(have))
            })
            .take(MAX_RECOMMENDATIONS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_repo() -> (tempfile::TempDir, RecipeStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DocumentStore::new(dir.path()).unwrap());
        (dir, RecipeStore::new(store))
    }

    fn new_recipe(name: &str, ingredients: &[&str]) -> NewRecipe {
        NewRecipe {
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: vec!["cook it".to_string()],
        }
    }

    #[test]
    fn test_add_then_list_round_trip() {
        let (_dir, repo) = temp_repo();

        let added = repo
            .add(1, new_recipe("Salmon soup", &["salmon", "leek"]), RecipeSource::Manual)
            .unwrap();
        assert_eq!(added.id, 1);

        let listed = repo.list(1);
        assert_eq!(listed, vec![added]);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let (_dir, repo) = temp_repo();
        let err = repo
            .add(1, new_recipe("  ", &["salmon"]), RecipeSource::Manual)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingField { field: "name", .. }
        ));
    }

    #[test]
    fn test_add_rejects_empty_steps() {
        let (_dir, repo) = temp_repo();
        let input = NewRecipe {
            name: "Toast".to_string(),
            ingredients: vec!["bread".to_string()],
            steps: vec![],
        };
        let err = repo.add(1, input, RecipeSource::Manual).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingField { field: "steps", .. }
        ));
    }

    #[test]
    fn test_list_is_owner_scoped() {
        let (_dir, repo) = temp_repo();
        repo.add(1, new_recipe("Mine", &["rice"]), RecipeSource::Manual)
            .unwrap();
        repo.add(2, new_recipe("Theirs", &["rice"]), RecipeSource::Manual)
            .unwrap();

        let listed = repo.list(1);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Mine");
    }

    #[test]
    fn test_recommend_matches_on_overlap() {
        let (_dir, repo) = temp_repo();
        repo.add(1, new_recipe("Fried rice", &["rice", "egg"]), RecipeSource::Manual)
            .unwrap();
        repo.add(1, new_recipe("Cod stew", &["cod", "potato"]), RecipeSource::Ai)
            .unwrap();

        let matches = repo.recommend(1, &["egg".to_string(), "milk".to_string()]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Fried rice");
    }

    #[test]
    fn test_recommend_caps_results() {
        let (_dir, repo) = temp_repo();
        for i in 0..15 {
            repo.add(1, new_recipe(&format!("Dish {i}"), &["rice"]), RecipeSource::Manual)
                .unwrap();
        }

        let matches = repo.recommend(1, &["rice".to_string()]);
        assert_eq!(matches.len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_recommend_empty_query_is_empty() {
        let (_dir, repo) = temp_repo();
        repo.add(1, new_recipe("Fried rice", &["rice"]), RecipeSource::Manual)
            .unwrap();
        assert!(repo.recommend(1, &[]).is_empty());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a recipe entered the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
    /// Entered by hand.
    #[default]
    Manual,
    /// Produced by the generative content adapter.
    Ai,
}

impl RecipeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Ai => "ai",
        }
    }
}

impl std::fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored recipe. Ingredient and step order is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub owner_id: u64,
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Records written before source tracking default to `Manual`.
    #[serde(default)]
    pub source: RecipeSource,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

/// A recipe from the user's hometown collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HometownRecipe {
    pub id: u64,
    pub owner_id: u64,
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new hometown recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHometownRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_source_round_trip() {
        let json = serde_json::to_string(&RecipeSource::Ai).unwrap();
        assert_eq!(json, "\"ai\"");
        let back: RecipeSource = serde_json::from_str("\"manual\"").unwrap();
        assert_eq!(back, RecipeSource::Manual);
    }

    #[test]
    fn test_recipe_without_source_defaults_to_manual() {
        let json = r#"{
            "id": 1,
            "owner_id": 1,
            "name": "Pan-fried salmon",
            "ingredients": ["salmon", "butter"],
            "steps": ["fry it"],
            "created_at": "2024-03-01T12:00:00Z"
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.source, RecipeSource::Manual);
    }
}

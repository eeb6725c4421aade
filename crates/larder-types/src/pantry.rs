use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a pantry item is a seasoning or a cooking ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PantryItemKind {
    Seasoning,
    Ingredient,
}

impl PantryItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seasoning => "seasoning",
            Self::Ingredient => "ingredient",
        }
    }
}

impl std::fmt::Display for PantryItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something the user keeps in their pantry.
///
/// Deduplicated per owner on (name, kind): the same name may appear once as
/// a seasoning and once as an ingredient, never twice as either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: u64,
    pub owner_id: u64,
    pub name: String,
    #[serde(rename = "item_type")]
    pub kind: PantryItemKind,
    /// Free-form amount, e.g. "500g" or "two jars".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new pantry item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPantryItem {
    pub name: String,
    #[serde(rename = "item_type")]
    pub kind: PantryItemKind,
    #[serde(default)]
    pub quantity: Option<String>,
}

/// An ingredient the user has selected for recipe matching.
/// Deduplicated per owner by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIngredient {
    pub id: u64,
    pub owner_id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

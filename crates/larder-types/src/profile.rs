use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the user lives. Singleton per owner: setting a new location
/// replaces the previous record outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub id: u64,
    pub owner_id: u64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// The user's recipe filter preferences. Singleton per owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeFilter {
    pub id: u64,
    pub owner_id: u64,
    /// Cooking-time bucket, e.g. "under-30".
    pub cooking_time: String,
    /// Whether the dish must pack well for lunch boxes.
    pub is_packable: bool,
    /// Whether the dish must work on an induction hob.
    pub is_induction: bool,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new filter preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipeFilter {
    pub cooking_time: String,
    pub is_packable: bool,
    pub is_induction: bool,
}

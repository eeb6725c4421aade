//! Shared record types for the larder cooking companion.
//!
//! Every persisted record carries three server-assigned fields: a `u64` id
//! that is unique and monotonic within its collection (never reused, even
//! after deletion), the `owner_id` of the user the record belongs to, and a
//! `created_at` timestamp. The `New*` input types carry only the
//! caller-supplied fields.
//!
//! Collections have no schema versioning, so optional fields use
//! `#[serde(default)]` and records written by older builds must keep
//! deserializing.

pub mod knowledge;
pub mod pantry;
pub mod profile;
pub mod recipe;

pub use knowledge::{KnowledgeItem, NewKnowledgeItem, TipItem};
pub use pantry::{NewPantryItem, PantryItem, PantryItemKind, UserIngredient};
pub use profile::{NewRecipeFilter, RecipeFilter, UserLocation};
pub use recipe::{HometownRecipe, NewHometownRecipe, NewRecipe, Recipe, RecipeSource};

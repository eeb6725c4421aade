//! Document store and entity repositories for larder.
//!
//! Persistence is flat JSON: one file per collection under a data
//! directory, rewritten whole on every mutation. That trade-off is fine at
//! this data volume and stays isolated behind [`DocumentStore`] so the
//! backing can later move to an embedded store without touching the
//! repositories.
//!
//! # Architecture
//!
//! ```text
//! DocumentStore            - load / save / allocate_next_id per collection
//!     ├── RecipeStore      - recipes (manual + AI), recommendations
//!     ├── PantryStore      - pantry items, skip-if-exists bulk add
//!     ├── TipStore         - curated tips, seeded defaults
//!     ├── KnowledgeStore   - knowledge feed
//!     ├── HometownStore    - hometown recipe feed
//!     ├── IngredientStore  - dedup-by-name ingredient picks
//!     ├── LocationStore    - singleton location per owner
//!     └── FilterStore      - singleton filter preferences per owner
//! ```
//!
//! Every mutating operation takes the collection's lock around its
//! load-mutate-save sequence, and every operation takes the acting
//! `owner_id` explicitly — there is no ambient current user.

pub mod document;
pub mod error;
pub mod hometown;
pub mod ingredients;
pub mod knowledge;
pub mod pantry;
pub mod profile;
pub mod recipes;
pub mod tips;

pub use document::DocumentStore;
pub use error::{Result, StoreError};
pub use hometown::HometownStore;
pub use ingredients::IngredientStore;
pub use knowledge::KnowledgeStore;
pub use pantry::PantryStore;
pub use profile::{FilterStore, LocationStore};
pub use recipes::RecipeStore;
pub use tips::TipStore;

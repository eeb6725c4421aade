//! Generative content call sites.
//!
//! Three uses of the chat backend, each with its own prompt pair and its
//! own [`FallbackPolicy`]: creative recipe generation (failures surface),
//! per-ingredient storage tips (failing items get a sentinel), and
//! community question lists (failures fall back to a built-in set).
//!
//! The backend returns raw text; the model is only *instructed* to emit
//! JSON. Parsing happens here, and a mismatch is a provider-format error,
//! never a panic.

use std::collections::HashMap;

use larder_types::NewRecipe;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::SharedChatBackend;
use crate::error::{GatewayError, Result};
use crate::fallback::FallbackPolicy;

// ─────────────────────────────────────────────────────────────────────────────
// Per-call-site policy table
// ─────────────────────────────────────────────────────────────────────────────

/// Recipe generation failures are user-visible.
pub const RECIPE_GENERATION_POLICY: FallbackPolicy = FallbackPolicy::Propagate;

/// A failed tip affects only its own ingredient.
pub const STORAGE_TIP_POLICY: FallbackPolicy = FallbackPolicy::ItemSentinel;

/// Question-list failures fall back to the built-in set.
pub const COMMUNITY_QUESTION_POLICY: FallbackPolicy = FallbackPolicy::BuiltinDefault;

// ─────────────────────────────────────────────────────────────────────────────
// Prompts
// ─────────────────────────────────────────────────────────────────────────────

const RECIPE_SYSTEM_PROMPT: &str = "You are a creative but safety-minded cook. \
    From the ingredients the user supplies, invent a recipe that is edible yet \
    slightly absurd. Your answer must be a single well-formed JSON object with \
    exactly three fields: `name`, `ingredients`, `steps`. Do not add any \
    explanation, comments, or Markdown markup outside the JSON object.";

const TIP_SYSTEM_PROMPT: &str = "You are a food preservation expert. \
    Respond strictly in the JSON format the user requests.";

const QUESTION_SYSTEM_PROMPT: &str =
    "Respond strictly with the JSON array format the user requests.";

/// Questions served when the generative call fails outright.
const DEFAULT_COMMUNITY_QUESTIONS: [&str; 5] = [
    "How do you make Norwegian salmon taste great?",
    "Where can I buy Asian seasonings?",
    "Why do vegetables here spoil so quickly?",
    "What are good ways to cook the local meat cuts?",
    "What dishes can I make with Brunost (brown cheese)?",
];

// ─────────────────────────────────────────────────────────────────────────────
// Result Types
// ─────────────────────────────────────────────────────────────────────────────

/// A recipe produced by the model, parsed but not yet persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl From<GeneratedRecipe> for NewRecipe {
    fn from(recipe: GeneratedRecipe) -> Self {
        NewRecipe {
            name: recipe.name,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
        }
    }
}

/// Storage advice for a single ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageTip {
    pub method: String,
    pub duration: String,
}

impl StorageTip {
    /// The sentinel served when the call for one ingredient fails.
    pub fn unavailable() -> Self {
        Self {
            method: "no suggestion".to_string(),
            duration: "N/A".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Content Gateway
// ─────────────────────────────────────────────────────────────────────────────

/// The generative call sites, bound to a chat backend.
pub struct ContentGateway {
    backend: SharedChatBackend,
}

impl ContentGateway {
    pub fn new(backend: SharedChatBackend) -> Self {
        Self { backend }
    }

    /// Generate a creative recipe from the given ingredients.
    ///
    /// No fallback: any failure — including model output that is not the
    /// requested JSON object — surfaces to the caller.
    pub async fn generate_recipe(&self, ingredients: &[String]) -> Result<GeneratedRecipe> {
        let user = format!(
            "Create a recipe from the following ingredients: [{}].",
            ingredients.join(", ")
        );

        match self.complete_json(RECIPE_SYSTEM_PROMPT, &user).await {
            Ok(recipe) => Ok(recipe),
            Err(err) => {
                RECIPE_GENERATION_POLICY.absorb("recipe_generation", err, GeneratedRecipe::default)
            }
        }
    }

    /// Fetch storage advice for each ingredient, one call per ingredient.
    ///
    /// A failing call yields the [`StorageTip::unavailable`] sentinel for
    /// that ingredient only; the rest of the batch is unaffected.
    pub async fn storage_tips(
        &self,
        ingredients: &[String],
    ) -> Result<HashMap<String, StorageTip>> {
        let mut tips = HashMap::with_capacity(ingredients.len());
        for ingredient in ingredients {
            let user = format!(
                "Give sound storage advice for \"{ingredient}\": the storage method \
                 and a rough shelf life. Respond with a JSON object with exactly two \
                 fields, 'method' and 'duration'."
            );

            let tip = match self.complete_json(TIP_SYSTEM_PROMPT, &user).await {
                Ok(tip) => tip,
                Err(err) => {
                    STORAGE_TIP_POLICY.absorb("storage_tips", err, StorageTip::unavailable)?
                }
            };
            tips.insert(ingredient.clone(), tip);
        }
        Ok(tips)
    }

    /// The most-asked cooking questions for expats in `region`.
    ///
    /// A full failure returns the built-in default list; nothing surfaces
    /// as an error.
    pub async fn community_questions(&self, region: &str) -> Result<Vec<String>> {
        let user = format!(
            "You are a data analyst for a cooking community. List the 5-7 cooking \
             questions most asked by the Chinese expat community in {region}. \
             Respond with a JSON array in which every element is a question string."
        );

        match self.complete_json(QUESTION_SYSTEM_PROMPT, &user).await {
            Ok(questions) => Ok(questions),
            Err(err) => COMMUNITY_QUESTION_POLICY.absorb(
                "community_questions",
                err,
                default_community_questions,
            ),
        }
    }

    /// Run a completion and parse the raw text as `T`.
    async fn complete_json<T: DeserializeOwned>(&self, system: &str, user: &str) -> Result<T> {
        let raw = self.backend.complete(system, user).await?;
        serde_json::from_str(raw.trim()).map_err(|e| {
            GatewayError::Format(format!("model output was not the requested JSON shape: {e}"))
        })
    }
}

fn default_community_questions() -> Vec<String> {
    DEFAULT_COMMUNITY_QUESTIONS
        .iter()
        .map(|q| q.to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

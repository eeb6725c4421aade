//! External-service gateway for larder.
//!
//! Two independent adapters over outbound HTTPS, neither of which touches
//! the document store:
//!
//! ```text
//! SpeechClient               - credential exchange + audio transcription
//!
//! ChatBackend trait          - complete(system, user) -> raw text
//!     ├── GenerativeClient   - OpenAI-compatible chat completions
//!     └── MockChatBackend    - queued responses for testing
//!             │
//!       ContentGateway       - recipe generation, storage tips,
//!                              community questions (per-site FallbackPolicy)
//! ```
//!
//! Calls are synchronous from the caller's view: awaited once, bounded by
//! an explicit timeout, never retried. Credentials and endpoints arrive
//! via configuration at startup and are read-only afterwards.

pub mod backend;
pub mod content;
pub mod error;
pub mod fallback;
pub mod generative;
pub mod speech;

pub use backend::{ChatBackend, MockChatBackend, SharedChatBackend};
pub use content::{
    COMMUNITY_QUESTION_POLICY, ContentGateway, GeneratedRecipe, RECIPE_GENERATION_POLICY,
    STORAGE_TIP_POLICY, StorageTip,
};
pub use error::{GatewayError, Result};
pub use fallback::FallbackPolicy;
pub use generative::{GenerativeClient, GenerativeConfig};
pub use speech::{DEFAULT_SAMPLE_RATE, SpeechClient, SpeechConfig};

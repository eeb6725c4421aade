use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A note in the user's cooking knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: u64,
    pub owner_id: u64,
    pub title: String,
    pub content: String,
    /// Optional image reference (URL or data URI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// The date the note is about, not when it was stored.
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new knowledge item.
///
/// `date` is an optional `YYYY-MM-DD` string; absent or unparsable values
/// fall back to today when the item is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewKnowledgeItem {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Curated reference data shown in the tips section: ingredient name
/// translations, cookware notes, cooking-oil guides.
///
/// The payload shape varies by `tip_type`, so it stays an opaque JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipItem {
    pub id: u64,
    /// Seeded reference tips are system-owned (owner 0).
    #[serde(default)]
    pub owner_id: u64,
    pub tip_type: String,
    /// Locale tag the tip applies to, e.g. "norway".
    pub context: String,
    #[serde(default)]
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

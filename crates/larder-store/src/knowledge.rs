//! Knowledge-base repository: dated cooking notes presented as a feed.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use larder_types::{KnowledgeItem, NewKnowledgeItem};

use crate::document::DocumentStore;
use crate::error::{Result, StoreError};

const COLLECTION: &str = "knowledge_items";

/// Repository for the `knowledge_items` collection.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    store: Arc<DocumentStore>,
}

impl KnowledgeStore {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Add a knowledge item. Requires a non-empty title and content; an
    /// absent or unparsable date falls back to today.
    pub fn add(&self, owner_id: u64, input: NewKnowledgeItem) -> Result<KnowledgeItem> {
        if input.title.trim().is_empty() {
            return Err(StoreError::missing_field("knowledge item", "title"));
        }
        if input.content.trim().is_empty() {
            return Err(StoreError::missing_field("knowledge item", "content"));
        }

        let date = parse_date_or_today(input.date.as_deref());

        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let mut items: Vec<KnowledgeItem> = self.store.load(COLLECTION);
        let item = KnowledgeItem {
            id: self.store.allocate_next_id(COLLECTION),
            owner_id,
            title: input.title,
            content: input.content,
            image: input.image,
            date,
            created_at: Utc::now(),
        };
        items.push(item.clone());
        self.store.save(COLLECTION, &items)?;

        tracing::debug!(id = item.id, owner_id, "knowledge item added");
        Ok(item)
    }

    /// The owner's knowledge items, newest first.
    pub fn list(&self, owner_id: u64) -> Vec<KnowledgeItem> {
        let mut items: Vec<KnowledgeItem> = self
            .store
            .load::<KnowledgeItem>(COLLECTION)
            .into_iter()
            .filter(|item| item.owner_id == owner_id)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    /// Delete the owner's item with this id.
    pub fn delete(&self, id: u64, owner_id: u64) -> Result<()> {
        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let mut items: Vec<KnowledgeItem> = self.store.load(COLLECTION);
        let before = items.len();
        items.retain(|item| !(item.id == id && item.owner_id == owner_id));

        if items.len() == before {
            return Err(StoreError::not_found("knowledge item", id));
        }
        self.store.save(COLLECTION, &items)?;

        tracing::debug!(id, owner_id, "knowledge item deleted");
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` date string, falling back to today.
fn parse_date_or_today(date: Option<&str>) -> NaiveDate {
    date.and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .unwrap_or_else(|| Utc::now().date_naive())
}

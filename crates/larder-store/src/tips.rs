//! Curated tip repository: ingredient translations, cookware notes, and
//! cooking-oil guides, filtered by tip type and locale context.

use std::sync::Arc;

use chrono::Utc;
use larder_types::TipItem;
use serde_json::json;

use crate::document::DocumentStore;
use crate::error::Result;

const COLLECTION: &str = "tip_items";

/// Owner id for seeded reference data.
const SYSTEM_OWNER: u64 = 0;

/// Repository for the `tip_items` collection.
#[derive(Debug, Clone)]
pub struct TipStore {
    store: Arc<DocumentStore>,
}

impl TipStore {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Tips matching both the tip type and the locale context.
    pub fn list(&self, tip_type: &str, context: &str) -> Vec<TipItem> {
        self.store
            .load::<TipItem>(COLLECTION)
            .into_iter()
            .filter(|tip| tip.tip_type == tip_type && tip.context == context)
            .collect()
    }

    /// Seed the built-in starter tips when the collection is empty.
    ///
    /// A no-op on a non-empty collection. Returns the number of tips written.
    pub fn seed_defaults(&self) -> Result<usize> {
        let lock = self.store.collection_lock(COLLECTION);
        let _guard = lock.lock();

        let existing: Vec<TipItem> = self.store.load(COLLECTION);
        if !existing.is_empty() {
            tracing::debug!(count = existing.len(), "tip collection already seeded");
            return Ok(0);
        }

        let tips = default_tips();
        self.store.save(COLLECTION, &tips)?;
        tracing::info!(count = tips.len(), "seeded default tips");
        Ok(tips.len())
    }
}

/// Starter reference set for the Norway locale: Chinese-to-Norwegian
/// ingredient translations plus cookware and oil guides.
fn default_tips() -> Vec<TipItem> {
    let now = Utc::now();
    let tip = |id: u64, tip_type: &str, data: serde_json::Value| TipItem {
        id,
        owner_id: SYSTEM_OWNER,
        tip_type: tip_type.to_string(),
        context: "norway".to_string(),
        data,
        created_at: now,
    };

    vec![
        tip(1, "translation", json!({"category": "ingredient", "cn": "三文鱼", "no": "Laks"})),
        tip(2, "translation", json!({"category": "ingredient", "cn": "鳕鱼", "no": "Torsk"})),
        tip(3, "translation", json!({"category": "ingredient", "cn": "土豆", "no": "Potet"})),
        tip(4, "translation", json!({"category": "seasoning", "cn": "酱油", "no": "Soyasaus"})),
        tip(5, "translation", json!({"category": "seasoning", "cn": "盐", "no": "Salt"})),
        tip(
            6,
            "cookware",
            json!({
                "name": "Non-stick pan (Stekepanne)",
                "size": "28cm",
                "material": "coated aluminium",
                "pros": "nothing sticks, easy to clean",
                "cons": "coating wears out"
            }),
        ),
        tip(
            7,
            "cookware",
            json!({
                "name": "Cast-iron pot (Støpejernsgryte)",
                "size": "24cm / 4L",
                "material": "cast iron",
                "pros": "even heat, keeps warm for ages",
                "cons": "heavy, needs seasoning"
            }),
        ),
        tip(
            8,
            "oil",
            json!({
                "name": "Rapeseed oil (Rapsolje)",
                "usage": "all-round: stir-fry and baking",
                "nutrition": "high in unsaturated fat"
            }),
        ),
        tip(
            9,
            "oil",
            json!({
                "name": "Butter (Smør)",
                "usage": "steak, baking, on bread",
                "nutrition": "rich flavour"
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_repo() -> (tempfile::TempDir, TipStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DocumentStore::new(dir.path()).unwrap());
        (dir, TipStore::new(store))
    }

    #[test]
    fn test_seed_populates_empty_collection() {
        let (_dir, repo) = temp_repo();
        let seeded = repo.seed_defaults().unwrap();
        assert_eq!(seeded, 9);
    }

    #[test]
    fn test_seed_is_noop_when_populated() {
        let (_dir, repo) = temp_repo();
        repo.seed_defaults().unwrap();

        let reseeded = repo.seed_defaults().unwrap();
        assert_eq!(reseeded, 0);
        assert_eq!(repo.list("translation", "norway").len(), 5);
    }

    #[test]
    fn test_list_filters_on_type_and_context() {
        let (_dir, repo) = temp_repo();
        repo.seed_defaults().unwrap();

        assert_eq!(repo.list("cookware", "norway").len(), 2);
        assert_eq!(repo.list("oil", "norway").len(), 2);
        assert!(repo.list("cookware", "sweden").is_empty());
        assert!(repo.list("visa", "norway").is_empty());
    }
}

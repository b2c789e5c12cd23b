use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use service_core::error::AppError;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::DocumentStore;

/// In-process document store.
///
/// Collections keep insertion order. Filters support top-level equality only,
/// which is all the content service queries with.
pub struct MemoryStore {
    name: String,
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: Mutex::new(BTreeMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<Document>>>, AppError> {
        self.collections
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Memory store mutex poisoned: {}", e)))
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn database_name(&self) -> &str {
        &self.name
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<ObjectId, AppError> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            _ => ObjectId::new(),
        };

        let mut stored = Document::new();
        stored.insert("_id", id);
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(id)
    }

    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        let collections = self.lock()?;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches_filter(d, &filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        let collections = self.lock()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches_filter(d, &filter)).cloned()))
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, AppError> {
        let collections = self.lock()?;
        let count = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches_filter(d, &filter)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn collection_names(&self) -> Result<Vec<String>, AppError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn insert_assigns_ids_and_keeps_order() {
        let store = MemoryStore::new("test");

        let first = store.insert_one("product", doc! { "slug": "a" }).await.unwrap();
        let second = store.insert_one("product", doc! { "slug": "b" }).await.unwrap();

        let docs = store.find("product", doc! {}).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].get_object_id("_id").unwrap(), first);
        assert_eq!(docs[1].get_object_id("_id").unwrap(), second);
        assert_eq!(docs[1].get_str("slug").unwrap(), "b");
    }

    #[tokio::test]
    async fn filters_match_top_level_equality() {
        let store = MemoryStore::new("test");
        store.insert_one("journalpost", doc! { "slug": "on-wholeness" }).await.unwrap();
        store.insert_one("journalpost", doc! { "slug": "on-rest" }).await.unwrap();

        let count = store
            .count("journalpost", doc! { "slug": "on-rest" })
            .await
            .unwrap();
        let missing = store
            .find_one("journalpost", doc! { "slug": "on-silence" })
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert!(missing.is_none());
        assert_eq!(store.collection_names().await.unwrap(), vec!["journalpost"]);
    }

    #[tokio::test]
    async fn unknown_collection_is_empty() {
        let store = MemoryStore::new("test");
        assert!(store.find("booking", doc! {}).await.unwrap().is_empty());
        assert_eq!(store.count("booking", doc! {}).await.unwrap(), 0);
    }
}

use async_trait::async_trait;
use metrics::counter;
use mongodb::bson::{self, doc, oid::ObjectId, DateTime, Document};
use service_core::error::AppError;
use std::sync::Arc;

use crate::models::{Entity, Slugged, Stored};

/// Raw document access over named collections.
///
/// Implementations never enforce uniqueness; callers that care (seeding)
/// check before inserting.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn database_name(&self) -> &str;

    /// Stores `document`, assigning an `_id` if it has none.
    async fn insert_one(&self, collection: &str, document: Document)
        -> Result<ObjectId, AppError>;

    /// All documents matching `filter`, in store order.
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, collection: &str, filter: Document)
        -> Result<Option<Document>, AppError>;

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, AppError>;

    async fn collection_names(&self) -> Result<Vec<String>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreDiagnostics {
    pub database_name: String,
    pub collections: Vec<String>,
}

/// Typed access to the content collections.
///
/// Holds no store when the service started without a database; every call
/// then fails with `AppError::StoreUnavailable`.
#[derive(Clone)]
pub struct ContentRepository {
    store: Option<Arc<dyn DocumentStore>>,
}

impl ContentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn database_name(&self) -> Option<&str> {
        self.store.as_deref().map(|s| s.database_name())
    }

    fn store(&self) -> Result<&dyn DocumentStore, AppError> {
        self.store.as_deref().ok_or(AppError::StoreUnavailable)
    }

    /// Inserts `entity` into its collection and returns the new id as hex.
    pub async fn insert<E: Entity>(&self, entity: &E) -> Result<String, AppError> {
        let store = self.store()?;

        let mut document = bson::to_document(entity)?;
        let now = DateTime::now();
        document.insert("created_at", now);
        document.insert("updated_at", now);

        let id = store.insert_one(E::COLLECTION, document).await?;
        tracing::info!(collection = E::COLLECTION, id = %id, "Inserted document");
        counter!("content_documents_inserted_total", "collection" => E::COLLECTION).increment(1);

        Ok(id.to_hex())
    }

    /// Every document in the collection that decodes as `E`.
    ///
    /// Documents that do not fit the entity shape are logged and skipped.
    pub async fn list<E: Entity>(&self) -> Result<Vec<Stored<E>>, AppError> {
        let documents = self.store()?.find(E::COLLECTION, doc! {}).await?;

        Ok(documents
            .into_iter()
            .filter_map(|d| {
                let id = d.get_object_id("_id").map(|id| id.to_hex()).ok();
                bson::from_document(d)
                    .inspect_err(|e| {
                        tracing::warn!(
                            collection = E::COLLECTION,
                            id = id.as_deref().unwrap_or("<none>"),
                            error = %e,
                            "Skipping document that does not match entity shape"
                        );
                    })
                    .ok()
            })
            .collect())
    }

    pub async fn find_by_slug<E: Slugged>(&self, slug: &str) -> Result<Option<Stored<E>>, AppError> {
        let document = self
            .store()?
            .find_one(E::COLLECTION, doc! { "slug": slug })
            .await?;

        document
            .map(|d| bson::from_document(d).map_err(AppError::from))
            .transpose()
    }

    pub async fn slug_exists<E: Slugged>(&self, slug: &str) -> Result<bool, AppError> {
        let count = self
            .store()?
            .count(E::COLLECTION, doc! { "slug": slug })
            .await?;
        Ok(count > 0)
    }

    pub async fn diagnostics(&self) -> Result<StoreDiagnostics, AppError> {
        let store = self.store()?;
        let collections = store.collection_names().await?;

        Ok(StoreDiagnostics {
            database_name: store.database_name().to_string(),
            collections,
        })
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store()?.ping().await
    }
}

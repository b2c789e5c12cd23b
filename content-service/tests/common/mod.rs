//! Shared helpers for router-level tests.
//!
//! The router is driven in-process with `oneshot`; the store is the
//! in-memory implementation unless a test swaps it.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use content_service::config::{ContentConfig, DatabaseConfig, StoreBackend};
use content_service::services::{ContentRepository, DocumentStore, MemoryStore};
use content_service::{build_router, AppState};
use mongodb::bson::{oid::ObjectId, Document};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn test_config(database_url: Option<&str>) -> ContentConfig {
    ContentConfig {
        common: CoreConfig { port: 0 },
        service_name: "content-service-test".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            url: database_url.map(|u| Secret::new(u.to_string())),
            name: "aham_eva_test".to_string(),
        },
        store_backend: StoreBackend::Memory,
        seed_on_startup: false,
    }
}

pub struct TestApp {
    pub router: Router,
    pub repository: ContentRepository,
}

impl TestApp {
    /// App backed by a fresh in-memory store.
    pub fn spawn() -> Self {
        Self::with_memory_store(Arc::new(MemoryStore::new("aham_eva_test")))
    }

    /// App over a caller-held in-memory store, for seeding raw documents.
    pub fn with_memory_store(store: Arc<MemoryStore>) -> Self {
        Self::with_repository(ContentRepository::new(store), Some("mongodb://memory"))
    }

    /// App started without a database, as when `DATABASE_URL` is unset.
    pub fn without_store() -> Self {
        Self::with_repository(ContentRepository::unavailable(), None)
    }

    /// App whose store is reachable in config but fails every call.
    pub fn with_broken_store() -> Self {
        Self::with_repository(
            ContentRepository::new(Arc::new(BrokenStore)),
            Some("mongodb://unreachable"),
        )
    }

    fn with_repository(repository: ContentRepository, database_url: Option<&str>) -> Self {
        let state = AppState {
            config: test_config(database_url),
            repository: repository.clone(),
        };

        Self {
            router: build_router(state),
            repository,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_raw(&self, uri: &str, body: &'static str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, body)
    }
}

/// Store that accepts the handle but fails every operation.
pub struct BrokenStore;

fn broken() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!(
        "server selection timeout: no available servers after 30000ms, topology unknown"
    ))
}

#[async_trait]
impl DocumentStore for BrokenStore {
    fn database_name(&self) -> &str {
        "aham_eva_broken"
    }

    async fn insert_one(&self, _: &str, _: Document) -> Result<ObjectId, AppError> {
        Err(broken())
    }

    async fn find(&self, _: &str, _: Document) -> Result<Vec<Document>, AppError> {
        Err(broken())
    }

    async fn find_one(&self, _: &str, _: Document) -> Result<Option<Document>, AppError> {
        Err(broken())
    }

    async fn count(&self, _: &str, _: Document) -> Result<u64, AppError> {
        Err(broken())
    }

    async fn collection_names(&self) -> Result<Vec<String>, AppError> {
        Err(broken())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(broken())
    }
}

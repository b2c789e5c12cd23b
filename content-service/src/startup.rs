//! Router assembly and server lifecycle.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, request_id_of};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{ContentConfig, StoreBackend};
use crate::handlers;
use crate::services::{seed_content, ContentRepository, MemoryStore, MongoDb};

/// Shared application state. The repository is the only handle to the store.
#[derive(Clone)]
pub struct AppState {
    pub config: ContentConfig,
    pub repository: ContentRepository,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/test", get(handlers::test_database))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/seed", post(handlers::seed))
        .route("/programs", get(handlers::list_programs))
        .route("/programs/:slug", get(handlers::get_program))
        .route("/therapy", get(handlers::list_therapy))
        .route("/shop", get(handlers::list_products))
        .route("/journal", get(handlers::list_posts))
        .route("/book", post(handlers::create_booking))
        .route("/contact", post(handlers::create_message))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id_of(request),
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        // Public API: any origin, method and header.
        .layer(CorsLayer::very_permissive())
}

/// Opens the configured store. Missing or broken configuration yields an
/// unavailable repository instead of an error so diagnostics stay reachable.
pub async fn open_repository(config: &ContentConfig) -> ContentRepository {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on restart");
            ContentRepository::new(Arc::new(MemoryStore::new(config.database.name.clone())))
        }
        StoreBackend::Mongo => {
            let Some(url) = &config.database.url else {
                tracing::warn!("DATABASE_URL not set, running without a store");
                return ContentRepository::unavailable();
            };

            match MongoDb::connect(
                url.expose_secret(),
                &config.database.name,
                &config.service_name,
            )
            .await
            {
                Ok(db) => ContentRepository::new(Arc::new(db)),
                Err(e) => {
                    tracing::error!(error = %e, "Store unavailable, continuing without it");
                    ContentRepository::unavailable()
                }
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    pub async fn build(config: ContentConfig) -> Result<Self, AppError> {
        let repository = open_repository(&config).await;

        if config.seed_on_startup {
            match seed_content(&repository).await {
                Ok(report) => tracing::info!(?report, "Startup seeding finished"),
                Err(e) => tracing::error!(error = %e, "Startup seeding failed"),
            }
        }

        let state = AppState {
            config: config.clone(),
            repository,
        };
        let router = build_router(state.clone());

        // Port 0 binds a random port for tests.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(service = %config.service_name, "Listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn repository(&self) -> &ContentRepository {
        &self.state.repository
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

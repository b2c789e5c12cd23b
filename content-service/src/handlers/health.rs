use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

use crate::startup::AppState;

const ERROR_PREVIEW_CHARS: usize = 50;
const COLLECTION_PREVIEW: usize = 10;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "brand": "Aham Eva", "status": "ok" }))
}

#[derive(Debug, Serialize)]
pub struct StoreReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn preview(message: &str) -> String {
    message.chars().take(ERROR_PREVIEW_CHARS).collect()
}

/// Store diagnostics. Always answers 200; store errors are reported inline.
pub async fn test_database(State(state): State<AppState>) -> Json<StoreReport> {
    let mut report = StoreReport {
        backend: "Running".to_string(),
        database: "Not Available".to_string(),
        database_url: if state.config.database_url_set() {
            "Set".to_string()
        } else {
            "Not Set".to_string()
        },
        database_name: "Not Set".to_string(),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let Some(name) = state.repository.database_name() else {
        return Json(report);
    };

    report.database = "Available".to_string();
    report.database_name = name.to_string();
    report.connection_status = "Connected".to_string();

    match state.repository.diagnostics().await {
        Ok(diagnostics) => {
            report.collections = diagnostics
                .collections
                .into_iter()
                .take(COLLECTION_PREVIEW)
                .collect();
            report.database = "Connected & Working".to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Store diagnostics failed");
            report.database = format!("Connected but Error: {}", preview(&e.to_string()));
        }
    }

    Json(report)
}

/// Liveness plus a store ping.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.repository.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": state.config.service_name,
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": state.config.service_name,
                "error": e.to_string()
            })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn preview_truncates_on_char_boundaries() {
        let long = "é".repeat(80);
        assert_eq!(preview(&long).chars().count(), 50);
        assert_eq!(preview("short"), "short");
    }
}

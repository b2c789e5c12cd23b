use axum::{extract::State, Json};
use serde::Serialize;
use service_core::error::AppError;

use crate::services::{seed_content, SeedReport};
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub seeded: SeedReport,
}

pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let seeded = seed_content(&state.repository).await?;
    Ok(Json(SeedResponse { seeded }))
}

//! Read-only content listings.

use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

use crate::models::{JournalPost, Product, Program, Stored, TherapyOffering};
use crate::startup::AppState;

pub async fn list_programs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Stored<Program>>>, AppError> {
    Ok(Json(state.repository.list::<Program>().await?))
}

pub async fn get_program(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Stored<Program>>, AppError> {
    let program = state
        .repository
        .find_by_slug::<Program>(&slug)
        .await?
        .ok_or_else(|| {
            tracing::debug!(slug = %slug, "Program lookup missed");
            AppError::NotFound(anyhow::anyhow!("Program not found"))
        })?;

    Ok(Json(program))
}

pub async fn list_therapy(
    State(state): State<AppState>,
) -> Result<Json<Vec<Stored<TherapyOffering>>>, AppError> {
    Ok(Json(state.repository.list::<TherapyOffering>().await?))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Stored<Product>>>, AppError> {
    Ok(Json(state.repository.list::<Product>().await?))
}

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Stored<JournalPost>>>, AppError> {
    Ok(Json(state.repository.list::<JournalPost>().await?))
}

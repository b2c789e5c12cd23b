//! Bookings and contact messages: validated inserts.

use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::dtos::{BookingPayload, ContactMessagePayload, CreatedResponse};
use crate::startup::AppState;
use crate::utils::ValidatedJson;

pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(booking): ValidatedJson<BookingPayload>,
) -> Result<Json<CreatedResponse>, AppError> {
    tracing::info!(therapy_slug = %booking.therapy_slug, "Creating booking");

    let id = state.repository.insert(&booking).await?;

    Ok(Json(CreatedResponse {
        id,
        status: "scheduled",
    }))
}

pub async fn create_message(
    State(state): State<AppState>,
    ValidatedJson(message): ValidatedJson<ContactMessagePayload>,
) -> Result<Json<CreatedResponse>, AppError> {
    tracing::info!("Recording contact message");

    let id = state.repository.insert(&message).await?;

    Ok(Json(CreatedResponse {
        id,
        status: "received",
    }))
}

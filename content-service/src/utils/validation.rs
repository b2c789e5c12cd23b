use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

use crate::dtos::{parse, Schema};

/// JSON body extractor that validates the payload and yields its entity.
///
/// Unparseable bodies, mistyped fields and schema violations are all
/// rejected with 422.
pub struct ValidatedJson<S: Schema>(pub S::Entity);

#[axum::async_trait]
impl<S, St> FromRequest<St> for ValidatedJson<S>
where
    S: Schema + Send + 'static,
    S::Entity: Send,
    St: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidPayload(e.body_text()))?;

        let entity = parse::<S>(value)
            .inspect_err(|e| tracing::debug!(error = %e, "Payload failed validation"))?;

        Ok(ValidatedJson(entity))
    }
}

//! Request schemas.
//!
//! Every payload type deserialises with all fields optional so that missing
//! required fields are reported by `validate()` together with constraint
//! violations, instead of failing on the first absent key. Values of the wrong
//! JSON type are reported the same way by `parse`. `into_entity`
//! turns a payload into its stored entity with defaults applied.

mod content;
mod inquiry;

pub use content::{
    JournalPostPayload, ProductPayload, ProgramModulePayload, ProgramPayload,
    TherapyOfferingPayload,
};
pub use inquiry::{BookingPayload, ContactMessagePayload};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use service_core::error::{field_errors, AppError};
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidateUrl, ValidationError, ValidationErrors};

/// A request payload that validates into a typed entity.
pub trait Schema: DeserializeOwned + Validate {
    type Entity;

    /// Builds the entity from an already validated payload.
    fn build(self) -> Result<Self::Entity, ValidationErrors>;

    fn into_entity(self) -> Result<Self::Entity, ValidationErrors> {
        self.validate()?;
        self.build()
    }
}

/// Validates an untyped JSON value against `S`.
///
/// Fields whose JSON type does not fit the schema are reported next to the
/// ordinary validation failures, keyed by field name, in a single map.
pub fn parse<S: Schema>(value: Value) -> Result<S::Entity, AppError> {
    let Value::Object(mut object) = value else {
        return Err(AppError::InvalidPayload(
            "request body must be a JSON object".to_string(),
        ));
    };

    let mismatched = type_mismatches::<S>(&object);
    for field in mismatched.keys() {
        object.remove(field);
    }

    let payload: S = serde_json::from_value(Value::Object(object))
        .map_err(|e| AppError::InvalidPayload(e.to_string()))?;
    let result = payload.into_entity();

    if mismatched.is_empty() {
        return Ok(result?);
    }

    let mut fields = match result {
        Ok(_) => BTreeMap::new(),
        Err(errors) => field_errors(&errors),
    };
    fields.extend(mismatched);
    Err(AppError::InvalidFields(fields))
}

/// Fields that fail to deserialise into `S` on their own.
///
/// Every schema field is optional or defaulted, so a one-key object only
/// fails when that key's value has the wrong type.
fn type_mismatches<S: Schema>(object: &Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    object
        .iter()
        .filter_map(|(field, value)| {
            let single = Map::from_iter([(field.clone(), value.clone())]);
            serde_json::from_value::<S>(Value::Object(single))
                .err()
                .map(|e| (field.clone(), vec![format!("{} has the wrong type: {}", field, e)]))
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub status: &'static str,
}

fn violation(field: &'static str, code: &'static str, message: String) -> ValidationErrors {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

/// Unwraps a field that `validate()` has already checked for presence.
fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationErrors> {
    value.ok_or_else(|| violation(field, "required", format!("{} is required", field)))
}

fn non_negative_count(value: i64, field: &'static str) -> Result<u32, ValidationErrors> {
    u32::try_from(value)
        .map_err(|_| violation(field, "range", format!("{} is out of range", field)))
}

/// Accepts absolute `http` and `https` URLs only.
fn http_url(value: &str) -> Result<(), ValidationError> {
    let has_web_scheme = ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });

    if has_web_scheme && value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

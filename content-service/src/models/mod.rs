//! Stored entities.
//!
//! Each entity maps to one MongoDB collection named after the lowercased type.
//! `Stored<E>` is the read-side wrapper: it carries the store-assigned `_id`
//! and timestamps next to the flattened entity fields, and renders them as
//! plain strings so no BSON encodings reach the wire.

mod booking;
mod contact;
mod journal;
mod product;
mod program;
mod therapy;

pub use booking::Booking;
pub use contact::ContactMessage;
pub use journal::JournalPost;
pub use product::Product;
pub use program::{Program, ProgramModule};
pub use therapy::TherapyOffering;

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{de::DeserializeOwned, Deserialize, Serialize, Serializer};

/// A record type persisted in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;
}

/// A slugged content entity that can be looked up by slug.
pub trait Slugged: Entity {
    fn slug(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stored<E> {
    #[serde(rename = "_id", default, serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,

    #[serde(flatten)]
    pub entity: E,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_datetime"
    )]
    pub created_at: Option<DateTime>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_datetime"
    )]
    pub updated_at: Option<DateTime>,
}

impl<E> Stored<E> {
    /// Hex form of the store identifier.
    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}

fn serialize_object_id<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(id) => serializer.serialize_str(&id.to_hex()),
        None => serializer.serialize_none(),
    }
}

fn serialize_datetime<S>(value: &Option<DateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => {
            let rendered = dt
                .try_to_rfc3339_string()
                .map_err(serde::ser::Error::custom)?;
            serializer.serialize_str(&rendered)
        }
        None => serializer.serialize_none(),
    }
}

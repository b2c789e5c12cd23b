use super::Entity;
use serde::{Deserialize, Serialize};

/// A session request. `therapy_slug` is not checked against existing offerings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub full_name: String,
    pub email: String,
    pub therapy_slug: String,
    pub preferred_date: String,
    pub note: Option<String>,
    pub timezone: Option<String>,
}

impl Entity for Booking {
    const COLLECTION: &'static str = "booking";
}

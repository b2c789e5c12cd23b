use super::{Entity, Slugged};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapyOffering {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    /// Session format, e.g. `1:1` or `group`.
    pub format: String,
    pub duration_minutes: u32,
    pub price_usd: f64,
}

impl Entity for TherapyOffering {
    const COLLECTION: &'static str = "therapyoffering";
}

impl Slugged for TherapyOffering {
    fn slug(&self) -> &str {
        &self.slug
    }
}

use super::{Entity, Slugged};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub price_usd: f64,
    /// One of `digital_audio`, `pdf` or `bundle`. Kept as free text so older
    /// documents with other kinds still load.
    pub kind: String,
    pub download_url: Option<String>,
    pub cover_image: Option<String>,
}

impl Entity for Product {
    const COLLECTION: &'static str = "product";
}

impl Slugged for Product {
    fn slug(&self) -> &str {
        &self.slug
    }
}

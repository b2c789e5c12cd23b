use super::{Entity, Slugged};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalPost {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    /// Markdown body.
    pub content_md: String,
    pub cover_image: Option<String>,
    pub published_on: Option<NaiveDate>,
}

impl Entity for JournalPost {
    const COLLECTION: &'static str = "journalpost";
}

impl Slugged for JournalPost {
    fn slug(&self) -> &str {
        &self.slug
    }
}

use super::{Entity, Slugged};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub title: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub duration_days: u32,
    pub price_usd: f64,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub modules: Vec<ProgramModule>,
    #[serde(default)]
    pub featured: bool,
}

/// One step of a program, ordered by position in `Program::modules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramModule {
    pub day: u32,
    pub title: String,
    pub summary: Option<String>,
    pub focus: Option<String>,
}

impl Entity for Program {
    const COLLECTION: &'static str = "program";
}

impl Slugged for Program {
    fn slug(&self) -> &str {
        &self.slug
    }
}

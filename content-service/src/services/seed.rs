//! Idempotent sample content.
//!
//! Each canonical record is inserted only when no document with its slug
//! exists yet, so the routine can run on every boot or on demand.

use serde::Serialize;
use service_core::error::AppError;

use super::ContentRepository;
use crate::models::{JournalPost, Product, Program, ProgramModule, Slugged, TherapyOffering};

pub const PROGRAM_SLUG: &str = "90-day-rebirth";
pub const THERAPY_SLUG: &str = "integrative-therapy-60";
pub const PRODUCT_SLUG: &str = "morning-breath-audio";
pub const JOURNAL_SLUG: &str = "on-wholeness";

/// Which canonical records this invocation created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub program: bool,
    pub therapy: bool,
    pub product: bool,
    pub journal: bool,
}

pub fn sample_program() -> Program {
    Program {
        title: "The 90-Day Rebirth".to_string(),
        slug: PROGRAM_SLUG.to_string(),
        tagline: Some("Reset. Rewire. Remember who you are.".to_string()),
        description: Some(
            "A structured, compassionate 90-day journey combining psychology, breathwork, and contemplative practice."
                .to_string(),
        ),
        duration_days: 90,
        price_usd: 499.0,
        cover_image: None,
        modules: vec![ProgramModule {
            day: 1,
            title: "Arrival".to_string(),
            summary: Some("Breathe, land, and begin.".to_string()),
            focus: None,
        }],
        featured: true,
    }
}

pub fn sample_therapy() -> TherapyOffering {
    TherapyOffering {
        title: "Integrative Therapy (60 mins)".to_string(),
        slug: THERAPY_SLUG.to_string(),
        description: Some("Evidence-based therapy held with presence and care.".to_string()),
        format: "1:1".to_string(),
        duration_minutes: 60,
        price_usd: 120.0,
    }
}

pub fn sample_product() -> Product {
    Product {
        title: "Morning Breath Ritual (Audio)".to_string(),
        slug: PRODUCT_SLUG.to_string(),
        description: Some(
            "A 12-minute guided breath sequence to begin clear and steady.".to_string(),
        ),
        price_usd: 9.0,
        kind: "digital_audio".to_string(),
        download_url: None,
        cover_image: None,
    }
}

pub fn sample_journal_post() -> JournalPost {
    JournalPost {
        title: "On Wholeness".to_string(),
        slug: JOURNAL_SLUG.to_string(),
        excerpt: Some("What returns when we stop trying to be more.".to_string()),
        content_md: "# On Wholeness\n\nIn the quiet, you are complete.".to_string(),
        cover_image: None,
        published_on: None,
    }
}

async fn seed_one<E: Slugged>(repository: &ContentRepository, entity: E) -> Result<bool, AppError> {
    if repository.slug_exists::<E>(entity.slug()).await? {
        tracing::debug!(collection = E::COLLECTION, slug = %entity.slug(), "Already seeded");
        return Ok(false);
    }

    repository.insert(&entity).await?;
    tracing::info!(collection = E::COLLECTION, slug = %entity.slug(), "Seeded sample content");
    Ok(true)
}

pub async fn seed_content(repository: &ContentRepository) -> Result<SeedReport, AppError> {
    if !repository.is_available() {
        return Err(AppError::StoreUnavailable);
    }

    Ok(SeedReport {
        program: seed_one(repository, sample_program()).await?,
        therapy: seed_one(repository, sample_therapy()).await?,
        product: seed_one(repository, sample_product()).await?,
        journal: seed_one(repository, sample_journal_post()).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn seeding_twice_creates_each_record_once() {
        let repo = ContentRepository::new(Arc::new(MemoryStore::new("test")));

        let first = seed_content(&repo).await.unwrap();
        let second = seed_content(&repo).await.unwrap();

        assert_eq!(
            first,
            SeedReport {
                program: true,
                therapy: true,
                product: true,
                journal: true
            }
        );
        assert_eq!(second, SeedReport::default());
        assert_eq!(repo.list::<Program>().await.unwrap().len(), 1);
        assert_eq!(repo.list::<TherapyOffering>().await.unwrap().len(), 1);
        assert_eq!(repo.list::<Product>().await.unwrap().len(), 1);
        assert_eq!(repo.list::<JournalPost>().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeding_fills_only_missing_records() {
        let repo = ContentRepository::new(Arc::new(MemoryStore::new("test")));
        repo.insert(&sample_product()).await.unwrap();

        let report = seed_content(&repo).await.unwrap();

        assert!(report.program && report.therapy && report.journal);
        assert!(!report.product);
        assert_eq!(repo.list::<Product>().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeding_requires_a_store() {
        let result = seed_content(&ContentRepository::unavailable()).await;
        assert!(matches!(result, Err(AppError::StoreUnavailable)));
    }
}

use super::{http_url, non_negative_count, required, Schema};
use crate::models::{JournalPost, Product, Program, ProgramModule, TherapyOffering};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Deserialize, Validate)]
pub struct ProgramPayload {
    #[validate(required(message = "title is required"))]
    pub title: Option<String>,

    #[validate(required(message = "slug is required"))]
    pub slug: Option<String>,

    pub tagline: Option<String>,
    pub description: Option<String>,

    #[validate(
        required(message = "duration_days is required"),
        range(min = 1, message = "duration_days must be >= 1")
    )]
    pub duration_days: Option<i64>,

    #[validate(
        required(message = "price_usd is required"),
        range(min = 0.0, message = "price_usd must be >= 0")
    )]
    pub price_usd: Option<f64>,

    #[validate(custom(function = "http_url", message = "cover_image must be a valid URL"))]
    pub cover_image: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub modules: Vec<ProgramModulePayload>,

    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProgramModulePayload {
    #[validate(
        required(message = "day is required"),
        range(min = 1, message = "day must be >= 1")
    )]
    pub day: Option<i64>,

    #[validate(required(message = "title is required"))]
    pub title: Option<String>,

    pub summary: Option<String>,
    pub focus: Option<String>,
}

impl Schema for ProgramModulePayload {
    type Entity = ProgramModule;

    fn build(self) -> Result<ProgramModule, ValidationErrors> {
        Ok(ProgramModule {
            day: non_negative_count(required(self.day, "day")?, "day")?,
            title: required(self.title, "title")?,
            summary: self.summary,
            focus: self.focus,
        })
    }
}

impl Schema for ProgramPayload {
    type Entity = Program;

    fn build(self) -> Result<Program, ValidationErrors> {
        let modules = self
            .modules
            .into_iter()
            .map(ProgramModulePayload::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Program {
            title: required(self.title, "title")?,
            slug: required(self.slug, "slug")?,
            tagline: self.tagline,
            description: self.description,
            duration_days: non_negative_count(
                required(self.duration_days, "duration_days")?,
                "duration_days",
            )?,
            price_usd: required(self.price_usd, "price_usd")?,
            cover_image: self.cover_image,
            modules,
            featured: self.featured,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TherapyOfferingPayload {
    #[validate(required(message = "title is required"))]
    pub title: Option<String>,

    #[validate(required(message = "slug is required"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(required(message = "format is required"))]
    pub format: Option<String>,

    #[validate(
        required(message = "duration_minutes is required"),
        range(min = 15, message = "duration_minutes must be >= 15")
    )]
    pub duration_minutes: Option<i64>,

    #[validate(
        required(message = "price_usd is required"),
        range(min = 0.0, message = "price_usd must be >= 0")
    )]
    pub price_usd: Option<f64>,
}

impl Schema for TherapyOfferingPayload {
    type Entity = TherapyOffering;

    fn build(self) -> Result<TherapyOffering, ValidationErrors> {
        Ok(TherapyOffering {
            title: required(self.title, "title")?,
            slug: required(self.slug, "slug")?,
            description: self.description,
            format: required(self.format, "format")?,
            duration_minutes: non_negative_count(
                required(self.duration_minutes, "duration_minutes")?,
                "duration_minutes",
            )?,
            price_usd: required(self.price_usd, "price_usd")?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProductPayload {
    #[validate(required(message = "title is required"))]
    pub title: Option<String>,

    #[validate(required(message = "slug is required"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(
        required(message = "price_usd is required"),
        range(min = 0.0, message = "price_usd must be >= 0")
    )]
    pub price_usd: Option<f64>,

    #[validate(required(message = "kind is required"))]
    pub kind: Option<String>,

    #[validate(custom(function = "http_url", message = "download_url must be a valid URL"))]
    pub download_url: Option<String>,

    #[validate(custom(function = "http_url", message = "cover_image must be a valid URL"))]
    pub cover_image: Option<String>,
}

impl Schema for ProductPayload {
    type Entity = Product;

    fn build(self) -> Result<Product, ValidationErrors> {
        Ok(Product {
            title: required(self.title, "title")?,
            slug: required(self.slug, "slug")?,
            description: self.description,
            price_usd: required(self.price_usd, "price_usd")?,
            kind: required(self.kind, "kind")?,
            download_url: self.download_url,
            cover_image: self.cover_image,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct JournalPostPayload {
    #[validate(required(message = "title is required"))]
    pub title: Option<String>,

    #[validate(required(message = "slug is required"))]
    pub slug: Option<String>,

    pub excerpt: Option<String>,

    #[validate(required(message = "content_md is required"))]
    pub content_md: Option<String>,

    #[validate(custom(function = "http_url", message = "cover_image must be a valid URL"))]
    pub cover_image: Option<String>,

    pub published_on: Option<NaiveDate>,
}

impl Schema for JournalPostPayload {
    type Entity = JournalPost;

    fn build(self) -> Result<JournalPost, ValidationErrors> {
        Ok(JournalPost {
            title: required(self.title, "title")?,
            slug: required(self.slug, "slug")?,
            excerpt: self.excerpt,
            content_md: required(self.content_md, "content_md")?,
            cover_image: self.cover_image,
            published_on: self.published_on,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::parse;
    use serde_json::json;
    use service_core::error::{field_errors, AppError};

    fn rebirth() -> serde_json::Value {
        json!({
            "title": "The 90-Day Rebirth",
            "slug": "90-day-rebirth",
            "duration_days": 90,
            "price_usd": 499,
            "modules": [{ "day": 1, "title": "Arrival" }]
        })
    }

    fn violations(err: AppError) -> std::collections::BTreeMap<String, Vec<String>> {
        match err {
            AppError::ValidationError(errors) => field_errors(&errors),
            AppError::InvalidFields(fields) => fields,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn program_applies_defaults() {
        let program = parse::<ProgramPayload>(rebirth()).unwrap();

        assert_eq!(program.duration_days, 90);
        assert_eq!(program.price_usd, 499.0);
        assert!(!program.featured);
        assert_eq!(program.tagline, None);
        assert_eq!(program.modules.len(), 1);
        assert_eq!(program.modules[0].summary, None);
    }

    #[test]
    fn program_module_day_zero_is_rejected() {
        let mut payload = rebirth();
        payload["modules"] = json!([{ "day": 0, "title": "Before" }]);

        let fields = violations(parse::<ProgramPayload>(payload).unwrap_err());

        assert_eq!(fields["modules[0].day"], vec!["day must be >= 1"]);
    }

    #[test]
    fn program_module_requires_title() {
        let mut payload = rebirth();
        payload["modules"] = json!([{ "day": 1, "title": "Arrival" }, { "day": 2 }]);

        let fields = violations(parse::<ProgramPayload>(payload).unwrap_err());

        assert_eq!(fields["modules[1].title"], vec!["title is required"]);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn program_reports_every_violation() {
        let payload = json!({
            "slug": "broken",
            "duration_days": 0,
            "price_usd": -5,
            "cover_image": "not a url"
        });

        let fields = violations(parse::<ProgramPayload>(payload).unwrap_err());

        assert_eq!(fields["title"], vec!["title is required"]);
        assert_eq!(fields["duration_days"], vec!["duration_days must be >= 1"]);
        assert_eq!(fields["price_usd"], vec!["price_usd must be >= 0"]);
        assert_eq!(fields["cover_image"], vec!["cover_image must be a valid URL"]);
    }

    #[test]
    fn program_type_mismatch_is_reported_with_other_violations() {
        let mut payload = rebirth();
        payload["duration_days"] = json!("ninety");
        payload["price_usd"] = json!(-1);
        payload.as_object_mut().unwrap().remove("title");

        let fields = violations(parse::<ProgramPayload>(payload).unwrap_err());

        assert_eq!(fields.len(), 3);
        assert!(fields["duration_days"][0].starts_with("duration_days has the wrong type"));
        assert_eq!(fields["price_usd"], vec!["price_usd must be >= 0"]);
        assert_eq!(fields["title"], vec!["title is required"]);
    }

    #[test]
    fn non_object_body_is_invalid_payload() {
        let err = parse::<ProgramPayload>(json!([1, 2, 3])).unwrap_err();

        assert!(matches!(err, AppError::InvalidPayload(_)));
    }

    #[test]
    fn urls_must_use_a_web_scheme() {
        let payload = json!({
            "title": "Card deck",
            "slug": "card-deck",
            "price_usd": 10,
            "kind": "bundle",
            "download_url": "javascript:alert(1)",
            "cover_image": "mailto:shop@example.com"
        });

        let fields = violations(parse::<ProductPayload>(payload).unwrap_err());

        assert_eq!(fields["download_url"], vec!["download_url must be a valid URL"]);
        assert_eq!(fields["cover_image"], vec!["cover_image must be a valid URL"]);
    }

    #[test]
    fn uppercase_https_scheme_is_accepted() {
        let mut payload = rebirth();
        payload["cover_image"] = json!("HTTPS://cdn.example.com/rebirth.jpg");

        assert!(parse::<ProgramPayload>(payload).is_ok());
    }

    #[test]
    fn therapy_requires_minimum_session_length() {
        let payload = json!({
            "title": "Quick check-in",
            "slug": "check-in",
            "format": "1:1",
            "duration_minutes": 10,
            "price_usd": 20
        });

        let fields = violations(parse::<TherapyOfferingPayload>(payload).unwrap_err());

        assert_eq!(fields["duration_minutes"], vec!["duration_minutes must be >= 15"]);
    }

    #[test]
    fn product_kind_is_not_restricted() {
        let payload = json!({
            "title": "Card deck",
            "slug": "card-deck",
            "price_usd": 0,
            "kind": "physical",
            "download_url": "https://cdn.example.com/deck.pdf"
        });

        let product = parse::<ProductPayload>(payload).unwrap();

        assert_eq!(product.kind, "physical");
        assert_eq!(product.price_usd, 0.0);
    }

    #[test]
    fn journal_post_parses_publication_date() {
        let payload = json!({
            "title": "On Wholeness",
            "slug": "on-wholeness",
            "content_md": "# On Wholeness",
            "published_on": "2024-03-01"
        });

        let post = parse::<JournalPostPayload>(payload).unwrap();

        assert_eq!(post.published_on, NaiveDate::from_ymd_opt(2024, 3, 1));
    }
}

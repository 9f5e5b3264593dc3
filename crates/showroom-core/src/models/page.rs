use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::document::Document;
use super::seo::Seo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
}

/// CMS page served at `/{slug}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: Document,
    pub seo: Seo,
    pub status: PageStatus,
    pub updated_at: DateTime<Utc>,
}

/// Slugs are lowercase ASCII words separated by single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let well_formed = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug");
        err.message = Some("Slug must be lowercase words separated by hyphens".into());
        Err(err)
    }
}

#[allow(clippy::ptr_arg)]
fn validate_slug_field(slug: &String) -> Result<(), ValidationError> {
    validate_slug(slug)
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePageRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(
        length(max = 100, message = "Slug must be at most 100 characters"),
        custom(function = "validate_slug_field")
    )]
    pub slug: String,
    #[serde(default)]
    pub content: Document,
    #[serde(default)]
    #[validate(nested)]
    pub seo: Seo,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdatePageRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(
        length(max = 100, message = "Slug must be at most 100 characters"),
        custom(function = "validate_slug_field")
    )]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<Document>,
    #[serde(default)]
    #[validate(nested)]
    pub seo: Option<Seo>,
}

impl Page {
    pub fn from_request(req: CreatePageRequest, now: DateTime<Utc>) -> Self {
        Page {
            id: Uuid::new_v4(),
            title: req.title,
            slug: req.slug,
            content: req.content,
            seo: req.seo,
            status: PageStatus::Draft,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, req: UpdatePageRequest, now: DateTime<Utc>) {
        if let Some(title) = req.title {
            self.title = title;
        }
        if let Some(slug) = req.slug {
            self.slug = slug;
        }
        if let Some(content) = req.content {
            self.content = content;
        }
        if let Some(seo) = req.seo {
            self.seo = seo;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_rules() {
        assert!(validate_slug("about-us").is_ok());
        assert!(validate_slug("financing2024").is_ok());
        assert!(validate_slug("About").is_err());
        assert!(validate_slug("-about").is_err());
        assert!(validate_slug("about--us").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_create_request_checks_slug() {
        let req = CreatePageRequest {
            title: "About".to_string(),
            slug: "About Us".to_string(),
            content: Document::default(),
            seo: Seo::default(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_rejects_unknown_keys() {
        assert!(serde_json::from_str::<UpdatePageRequest>(r#"{"status":"published"}"#).is_err());
        let req: UpdatePageRequest = serde_json::from_str(r#"{"title":"About us"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("About us"));
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Search-engine fields shared by vehicles and pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Seo {
    #[serde(default)]
    #[validate(length(max = 70, message = "Meta title must be at most 70 characters"))]
    pub meta_title: Option<String>,
    #[serde(default)]
    #[validate(length(
        max = 160,
        message = "Meta description must be at most 160 characters"
    ))]
    pub meta_description: Option<String>,
}

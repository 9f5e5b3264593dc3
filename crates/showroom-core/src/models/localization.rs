use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Localized descriptive metadata of one asset in one locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LocalizedMetadata {
    pub fn new(title: &str, alt_text: &str, description: &str) -> Self {
        LocalizedMetadata {
            title: Some(title.to_string()),
            alt_text: Some(alt_text.to_string()),
            description: Some(description.to_string()),
        }
    }

    pub fn get(&self, field: MetadataField) -> Option<&str> {
        match field {
            MetadataField::Title => self.title.as_deref(),
            MetadataField::AltText => self.alt_text.as_deref(),
            MetadataField::Description => self.description.as_deref(),
        }
    }

    pub fn set(&mut self, field: MetadataField, value: String) {
        let slot = match field {
            MetadataField::Title => &mut self.title,
            MetadataField::AltText => &mut self.alt_text,
            MetadataField::Description => &mut self.description,
        };
        *slot = Some(value);
    }

    /// A field counts as filled when it holds non-whitespace text.
    pub fn is_filled(&self, field: MetadataField) -> bool {
        self.get(field).is_some_and(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    Title,
    AltText,
    Description,
}

impl MetadataField {
    pub const ALL: [MetadataField; 3] = [
        MetadataField::Title,
        MetadataField::AltText,
        MetadataField::Description,
    ];

    /// Fields the default locale needs before an asset counts as described.
    pub const REQUIRED: [MetadataField; 2] = [MetadataField::Title, MetadataField::AltText];
}

impl Display for MetadataField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MetadataField::Title => write!(f, "title"),
            MetadataField::AltText => write!(f, "alt_text"),
            MetadataField::Description => write!(f, "description"),
        }
    }
}

impl FromStr for MetadataField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(MetadataField::Title),
            "alt_text" | "alttext" | "alt" => Ok(MetadataField::AltText),
            "description" => Ok(MetadataField::Description),
            _ => Err(anyhow::anyhow!("Invalid metadata field: {}", s)),
        }
    }
}

/// Translation state of one locale for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    Complete,
    Incomplete,
    NotTranslated,
}

impl Display for TranslationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TranslationStatus::Complete => write!(f, "complete"),
            TranslationStatus::Incomplete => write!(f, "incomplete"),
            TranslationStatus::NotTranslated => write!(f, "not translated"),
        }
    }
}

/// Locale code to metadata, ordered by code
pub type LocalizationMap = BTreeMap<String, LocalizedMetadata>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_filled_trims() {
        let mut meta = LocalizedMetadata::default();
        assert!(!meta.is_filled(MetadataField::Title));
        meta.set(MetadataField::Title, "   ".to_string());
        assert!(!meta.is_filled(MetadataField::Title));
        meta.set(MetadataField::Title, " Car ".to_string());
        assert!(meta.is_filled(MetadataField::Title));
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("alt".parse::<MetadataField>().unwrap(), MetadataField::AltText);
        assert_eq!(
            "Description".parse::<MetadataField>().unwrap(),
            MetadataField::Description
        );
        assert!("caption".parse::<MetadataField>().is_err());
    }
}

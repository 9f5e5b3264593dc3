use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

/// Pixel dimensions of an image asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Media file record managed by the asset store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub url: String,
    /// Empty when the asset has no preview
    pub thumbnail_url: String,
    pub uploaded_at: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

impl Asset {
    /// Build an asset with a fresh id.
    ///
    /// Images get their own URL as thumbnail; any other type gets none and
    /// loses `dimensions`, which only images may carry.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        url: impl Into<String>,
        uploaded_at: NaiveDate,
        dimensions: Option<Dimensions>,
    ) -> Self {
        let mime_type = mime_type.into();
        let url = url.into();
        let is_image = is_image_mime(&mime_type);
        Asset {
            id: Uuid::new_v4(),
            name: name.into(),
            thumbnail_url: if is_image { url.clone() } else { String::new() },
            mime_type,
            size_bytes,
            url,
            uploaded_at,
            dimensions: dimensions.filter(|_| is_image),
        }
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = thumbnail_url.into();
        self
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }

    pub fn kind(&self) -> AssetKind {
        if self.is_image() {
            AssetKind::Image
        } else {
            AssetKind::Document
        }
    }
}

fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// Coarse asset category; anything that is not an image is a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Document,
}

impl Display for AssetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AssetKind::Image => write!(f, "image"),
            AssetKind::Document => write!(f, "document"),
        }
    }
}

/// Type filter applied by the asset query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Image,
    Document,
}

impl TypeFilter {
    pub fn matches(&self, asset: &Asset) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Image => asset.kind() == AssetKind::Image,
            TypeFilter::Document => asset.kind() == AssetKind::Document,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "image" => Ok(TypeFilter::Image),
            "document" => Ok(TypeFilter::Document),
            _ => Err(anyhow::anyhow!("Invalid type filter: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    #[default]
    Date,
    Size,
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "date" => Ok(SortKey::Date),
            "size" => Ok(SortKey::Size),
            _ => Err(anyhow::anyhow!("Invalid sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(anyhow::anyhow!("Invalid sort direction: {}", s)),
        }
    }
}

/// Parameters of the asset list view. The default shows everything,
/// newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetQuery {
    pub search: String,
    #[serde(rename = "type")]
    pub type_filter: TypeFilter,
    pub sort_by: SortKey,
    pub direction: SortDirection,
}

impl AssetQuery {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn of_type(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }

    pub fn sorted(mut self, sort_by: SortKey, direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.direction = direction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    #[test]
    fn test_dimensions_only_kept_for_images() {
        let dims = Some(Dimensions {
            width: 800,
            height: 600,
        });
        let image = Asset::new("a.jpg", "image/jpeg", 10, "/a.jpg", day(), dims);
        let pdf = Asset::new("b.pdf", "application/pdf", 10, "/b.pdf", day(), dims);

        assert_eq!(image.dimensions, dims);
        assert_eq!(image.thumbnail_url, "/a.jpg");
        assert!(pdf.dimensions.is_none());
        assert_eq!(pdf.thumbnail_url, "");
        assert_eq!(pdf.kind(), AssetKind::Document);
    }

    #[test]
    fn test_type_filter_matches() {
        let image = Asset::new("a.png", "image/png", 1, "/a.png", day(), None);
        let video = Asset::new("c.mp4", "video/mp4", 1, "/c.mp4", day(), None);

        assert!(TypeFilter::All.matches(&video));
        assert!(TypeFilter::Image.matches(&image));
        assert!(!TypeFilter::Image.matches(&video));
        assert!(TypeFilter::Document.matches(&video));
    }

    #[test]
    fn test_query_parsing() {
        assert_eq!("IMAGE".parse::<TypeFilter>().unwrap(), TypeFilter::Image);
        assert_eq!("size".parse::<SortKey>().unwrap(), SortKey::Size);
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!("video".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn test_query_deserializes_type_field() {
        let query: AssetQuery =
            serde_json::from_str(r#"{"search":"car","type":"document","sort_by":"name"}"#)
                .unwrap();
        assert_eq!(query.type_filter, TypeFilter::Document);
        assert_eq!(query.sort_by, SortKey::Name);
        assert_eq!(query.direction, SortDirection::Desc);
    }
}

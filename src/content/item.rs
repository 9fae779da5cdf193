//! Content item models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::helpers::parse_date;

/// A member credited on a project card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub avatar: String,
    #[serde(rename = "linkedIn")]
    pub linked_in: String,
}

/// Normalised front-matter of a content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: String,
    pub summary: String,
    /// ISO-8601 timestamp as written in the file (or the load time)
    pub published_at: String,
    pub tag: String,
    pub image: String,
    pub images: Vec<String>,
    pub link: String,
    pub team: Vec<TeamMember>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            summary: String::new(),
            published_at: String::new(),
            tag: String::new(),
            image: String::new(),
            images: Vec::new(),
            link: String::new(),
            team: Vec::new(),
        }
    }
}

/// One piece of authored content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// File name without extension
    pub slug: String,
    pub metadata: Metadata,
    /// Raw body text after the front-matter block
    pub content: String,

    /// When the item was read; stands in for an unparsable `publishedAt`
    #[serde(skip)]
    pub loaded_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    pub fn new(slug: impl Into<String>, metadata: Metadata, content: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            metadata,
            content: content.into(),
            loaded_at: None,
        }
    }

    /// The date this item sorts by.
    ///
    /// An unparsable `publishedAt` resolves to the load time, and an item
    /// with neither sorts as the oldest possible date.
    pub fn published(&self) -> DateTime<Utc> {
        match parse_date(&self.metadata.published_at) {
            Some(date) => date,
            None => {
                tracing::debug!(
                    "Unparsable publishedAt {:?} on {}, using load time",
                    self.metadata.published_at,
                    self.slug
                );
                self.loaded_at.unwrap_or(DateTime::<Utc>::MIN_UTC)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(published_at: &str) -> ContentItem {
        ContentItem::new(
            "example",
            Metadata {
                published_at: published_at.to_string(),
                ..Default::default()
            },
            "",
        )
    }

    #[test]
    fn test_published_parses_metadata() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(item("2024-05-01").published(), expected);
    }

    #[test]
    fn test_invalid_date_uses_load_time() {
        let loaded_at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let mut item = item("not a date");
        item.loaded_at = Some(loaded_at);
        assert_eq!(item.published(), loaded_at);
    }

    #[test]
    fn test_invalid_date_without_load_time_is_oldest() {
        assert_eq!(item("???").published(), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(item("2024-05-01")).unwrap();
        assert_eq!(json["metadata"]["publishedAt"], "2024-05-01");
        assert_eq!(json["metadata"]["title"], "Untitled");
        assert!(json.get("loaded_at").is_none());
    }
}

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MediaError;

/// Backend identifier, numeric or textual
///
/// The backend is free to use either; the client echoes back whichever form
/// it received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

pub type MediaId = ResourceId;

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for ResourceId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => ResourceId::Number(n),
            Err(_) => ResourceId::Text(s.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: MediaId,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub location: Option<String>,
    /// Comma-separated names of the people in the photo
    pub people: Option<String>,
    pub blob_url: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub blob_name: Option<String>,
}

impl Media {
    /// Record carrying only an id, for items not present in the loaded feed
    pub fn with_id(id: MediaId) -> Self {
        Self {
            id,
            title: None,
            caption: None,
            location: None,
            people: None,
            blob_url: None,
            url: None,
            image_url: None,
            blob_name: None,
        }
    }

    pub fn display_title(&self) -> &str {
        non_empty(&self.title).unwrap_or("Untitled")
    }

    pub fn caption(&self) -> Option<&str> {
        non_empty(&self.caption)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    /// Names listed in `people`, trimmed, blanks dropped
    pub fn people_names(&self) -> Vec<&str> {
        self.people
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Lowercased `title caption location people`, the text searched by the feed filter
    pub fn search_text(&self) -> String {
        [&self.title, &self.caption, &self.location, &self.people]
            .iter()
            .map(|field| field.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

/// Field value, treating empty strings as absent
pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default, alias = "comment")]
    pub text: String,
    #[serde(default)]
    pub created_by: Option<CommentAuthor>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Comment {
    pub fn author(&self) -> &str {
        self.created_by
            .as_ref()
            .and_then(|author| non_empty(&author.email))
            .unwrap_or("User")
    }

    /// Creation time in UTC when it parses as RFC 3339, verbatim otherwise
    pub fn created_at_display(&self) -> Option<String> {
        let raw = non_empty(&self.created_at)?;
        Some(match DateTime::parse_from_rfc3339(raw) {
            Ok(at) => at.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            Err(_) => raw.to_string(),
        })
    }
}

/// A single rating, 1 to 5 stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = MediaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(MediaError::Validation(format!(
                "Rating must be between {} and {}",
                Self::MIN,
                Self::MAX
            )))
        }
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side rating aggregate for one media item
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u64,
}

impl fmt::Display for RatingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rating: {:.1} ({})", self.average, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_id_keeps_its_wire_form() {
        let numeric: Media = serde_json::from_value(json!({ "id": 42 })).unwrap();
        let textual: Media = serde_json::from_value(json!({ "id": "a1b2" })).unwrap();

        assert_eq!(numeric.id, ResourceId::Number(42));
        assert_eq!(textual.id, ResourceId::Text("a1b2".to_string()));
        assert_eq!(serde_json::to_value(&numeric.id).unwrap(), json!(42));
        assert_eq!("42".parse::<ResourceId>().unwrap(), ResourceId::Number(42));
    }

    #[test]
    fn media_reads_camel_case_fields() {
        let media: Media = serde_json::from_value(json!({
            "id": 1,
            "title": "Sunset",
            "blobUrl": "https://cdn/a.jpg",
            "blobName": "a.jpg",
            "people": "Ann, Bob,, ",
        }))
        .unwrap();

        assert_eq!(media.blob_url.as_deref(), Some("https://cdn/a.jpg"));
        assert_eq!(media.blob_name.as_deref(), Some("a.jpg"));
        assert_eq!(media.people_names(), vec!["Ann", "Bob"]);
        assert_eq!(media.search_text(), "sunset   ann, bob,, ");
    }

    #[test]
    fn empty_title_displays_untitled() {
        let mut media = Media::with_id(ResourceId::Number(1));
        assert_eq!(media.display_title(), "Untitled");
        media.title = Some(String::new());
        assert_eq!(media.display_title(), "Untitled");
    }

    #[test]
    fn comment_accepts_legacy_text_key() {
        let comment: Comment = serde_json::from_value(json!({ "comment": "nice" })).unwrap();
        assert_eq!(comment.text, "nice");
        assert_eq!(comment.author(), "User");
        assert_eq!(comment.created_at_display(), None);
    }

    #[test]
    fn comment_timestamp_is_normalized() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 1,
            "text": "nice",
            "createdBy": { "email": "consumer@photoapp.com" },
            "createdAt": "2024-05-01T10:00:00+02:00",
        }))
        .unwrap();

        assert_eq!(comment.author(), "consumer@photoapp.com");
        assert_eq!(
            comment.created_at_display().as_deref(),
            Some("2024-05-01 08:00:00 UTC")
        );
    }

    #[test]
    fn rating_value_is_bounded() {
        assert!(RatingValue::try_from(0).is_err());
        assert!(RatingValue::try_from(6).is_err());
        assert_eq!(RatingValue::try_from(5).unwrap().get(), 5);
    }

    #[test]
    fn rating_summary_display() {
        let summary = RatingSummary {
            average: 4.5,
            count: 2,
        };
        assert_eq!(summary.to_string(), "Rating: 4.5 (2)");
        assert_eq!(RatingSummary::default().to_string(), "Rating: 0.0 (0)");
    }
}

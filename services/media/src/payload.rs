//! Response shapes accepted from the backend
//!
//! The backend variants disagree on how lists and rating aggregates are
//! wrapped. Each supported shape is one variant here, and repositories convert
//! to the client's models right after decoding.

use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::RatingSummary;

/// A list response: `{items}`, `{comments}`, a bare array or nothing
///
/// Elements stay raw until [`ListPayload::into_items`], so one unreadable
/// record cannot hide the rest of the list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload {
    Items { items: Vec<Value> },
    Comments { comments: Vec<Value> },
    Bare(Vec<Value>),
    Empty,
    Other(Map<String, Value>),
}

impl ListPayload {
    /// Decode every element, skipping the ones that do not fit `T`
    pub fn into_items<T: DeserializeOwned>(self) -> Vec<T> {
        let raw = match self {
            ListPayload::Items { items } => items,
            ListPayload::Comments { comments } => comments,
            ListPayload::Bare(items) => items,
            ListPayload::Empty => Vec::new(),
            ListPayload::Other(object) => {
                debug!(
                    "List response without a usable list (keys: {:?})",
                    object.keys().collect::<Vec<_>>()
                );
                Vec::new()
            }
        };

        raw.into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Skipping unreadable list entry {}: {}", index, e);
                    None
                }
            })
            .collect()
    }
}

/// Numeric field that may arrive as a number or a numeric string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Numeric {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(text) => text.trim().parse().ok(),
            Numeric::Other(_) => None,
        }
    }
}

/// One entry of a raw rating list
#[derive(Debug, Default, Deserialize)]
pub struct RatingEntry {
    #[serde(default)]
    pub value: Option<Numeric>,
    #[serde(default)]
    pub rating: Option<Numeric>,
}

impl RatingEntry {
    /// First usable non-zero of `value` then `rating`
    pub fn score(&self) -> Option<f64> {
        [&self.value, &self.rating]
            .into_iter()
            .flatten()
            .filter_map(Numeric::as_f64)
            .find(|score| score.is_finite() && *score != 0.0)
    }
}

/// Element of a raw rating list; anything that is not an object is ignored
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RatingItem {
    Entry(RatingEntry),
    Other(IgnoredAny),
}

/// A rating response in any of the supported shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RatingPayload {
    Summary {
        avg: f64,
        #[serde(default)]
        count: Option<u64>,
    },
    Average {
        average: f64,
        #[serde(default)]
        count: Option<u64>,
    },
    Items {
        items: Vec<RatingItem>,
    },
    Unknown(IgnoredAny),
}

impl From<RatingPayload> for RatingSummary {
    fn from(payload: RatingPayload) -> Self {
        match payload {
            RatingPayload::Summary { avg, count } => RatingSummary {
                average: avg,
                count: count.unwrap_or(0),
            },
            RatingPayload::Average { average, count } => RatingSummary {
                average,
                count: count.unwrap_or(0),
            },
            RatingPayload::Items { items } => {
                // Zero or missing entries carry no signal
                let values: Vec<f64> = items
                    .iter()
                    .filter_map(|item| match item {
                        RatingItem::Entry(entry) => entry.score(),
                        RatingItem::Other(_) => None,
                    })
                    .collect();

                if values.is_empty() {
                    return RatingSummary::default();
                }

                RatingSummary {
                    average: values.iter().sum::<f64>() / values.len() as f64,
                    count: values.len() as u64,
                }
            }
            RatingPayload::Unknown(_) => RatingSummary::default(),
        }
    }
}

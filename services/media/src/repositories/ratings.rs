//! Rating repository

use common::{error::ClientResult, http::ApiClient};
use serde::Serialize;
use serde::de::IgnoredAny;

use super::PhotoQuery;
use crate::{
    models::{MediaId, RatingSummary, RatingValue},
    payload::RatingPayload,
};

pub const RATINGS_PATH: &str = "/api/ratings";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewRating<'a> {
    photo_id: &'a MediaId,
    rating: RatingValue,
}

/// Rating repository for one backend
#[derive(Debug, Clone)]
pub struct RatingRepository {
    api: ApiClient,
}

impl RatingRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Aggregate rating of a media item
    pub async fn summary(&self, photo_id: &MediaId) -> ClientResult<RatingSummary> {
        let payload: RatingPayload = self
            .api
            .get_json_with_query(RATINGS_PATH, &PhotoQuery { photo_id })
            .await?;
        Ok(payload.into())
    }

    /// Submit the current user's rating of a media item
    pub async fn submit(&self, photo_id: &MediaId, rating: RatingValue) -> ClientResult<()> {
        let _: IgnoredAny = self
            .api
            .post_json(RATINGS_PATH, &NewRating { photo_id, rating })
            .await?;
        Ok(())
    }
}

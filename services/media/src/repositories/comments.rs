//! Comment repository

use common::{error::ClientResult, http::ApiClient};
use serde::Serialize;
use serde::de::IgnoredAny;

use super::PhotoQuery;
use crate::{
    models::{Comment, MediaId},
    payload::ListPayload,
};

pub const COMMENTS_PATH: &str = "/api/comments";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewComment<'a> {
    photo_id: &'a MediaId,
    text: &'a str,
}

/// Comment repository for one backend
#[derive(Debug, Clone)]
pub struct CommentRepository {
    api: ApiClient,
}

impl CommentRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Comments of a media item, in server order
    pub async fn list(&self, photo_id: &MediaId) -> ClientResult<Vec<Comment>> {
        let payload: ListPayload = self
            .api
            .get_json_with_query(COMMENTS_PATH, &PhotoQuery { photo_id })
            .await?;
        Ok(payload.into_items())
    }

    /// Append a comment to a media item
    pub async fn create(&self, photo_id: &MediaId, text: &str) -> ClientResult<()> {
        let _: IgnoredAny = self
            .api
            .post_json(COMMENTS_PATH, &NewComment { photo_id, text })
            .await?;
        Ok(())
    }
}

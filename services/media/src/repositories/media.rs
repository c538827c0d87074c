//! Media repository for listing endpoints

use common::{error::ClientResult, http::ApiClient};
use serde::Serialize;

use crate::{models::Media, payload::ListPayload};

/// Full listing, filtered on the client
pub const PHOTOS_PATH: &str = "/api/photos";
/// Paginated listing, filtered on the server
pub const MEDIA_PATH: &str = "/api/media";

/// Query parameters for the paginated listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    /// Page number (1-based)
    pub page: u32,
    /// Number of items per page
    pub limit: u32,
    /// Search term, empty for no filtering
    pub search: String,
}

/// Media repository for the listing endpoints
#[derive(Debug, Clone)]
pub struct MediaRepository {
    api: ApiClient,
}

impl MediaRepository {
    /// Create a new media repository
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Get every media item
    pub async fn list_all(&self) -> ClientResult<Vec<Media>> {
        let payload: ListPayload = self.api.get_json(PHOTOS_PATH).await?;
        Ok(payload.into_items())
    }

    /// Get one page of media items matching `query.search`
    pub async fn list_page(&self, query: &PageQuery) -> ClientResult<Vec<Media>> {
        let payload: ListPayload =
            self.api.get_json_with_query(MEDIA_PATH, query).await?;
        Ok(payload.into_items())
    }
}

//! Consumer feed: listing, search and pagination

use common::{
    config::{FeedConfig, FeedSource},
    error::{ClientError, StatusMessage},
};
use tracing::info;

use crate::{
    models::Media,
    repositories::{MediaRepository, media::PageQuery},
};

/// Status shown when the listing cannot be loaded
pub const LOAD_FAILED: &str = "Failed to load photos";

/// Items whose search text contains `query`, ignoring case
///
/// A blank query keeps every item. The match runs over
/// `title caption location people` joined by spaces, so a query may span
/// adjacent fields.
pub fn filter_media<'a>(items: &'a [Media], query: &str) -> Vec<&'a Media> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|media| media.search_text().contains(&needle))
        .collect()
}

/// 1-based page cursor
///
/// "Prev" stops at the first page; "Next" is unbounded and relies on the
/// backend returning an empty page past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pagination {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn next(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Jump to `page`, clamped to the first page
    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

/// State of the consumer feed
#[derive(Debug)]
pub struct Feed {
    repository: MediaRepository,
    source: FeedSource,
    page_size: u32,
    items: Vec<Media>,
    query: String,
    pagination: Pagination,
    status: Option<String>,
}

impl Feed {
    pub fn new(repository: MediaRepository, config: &FeedConfig) -> Self {
        Self {
            repository,
            source: config.source,
            page_size: config.page_size.max(1),
            items: Vec::new(),
            query: String::new(),
            pagination: Pagination::default(),
            status: None,
        }
    }

    /// Fetch the listing for the current query and page
    ///
    /// On failure the previous items stay in place and the status carries the
    /// error. Returns the number of items received.
    pub async fn refresh(&mut self) -> Result<usize, ClientError> {
        self.status = None;

        let result = match self.source {
            FeedSource::Full => self.repository.list_all().await,
            FeedSource::Paged => {
                let query = PageQuery {
                    page: self.pagination.page(),
                    limit: self.page_size,
                    search: self.query.clone(),
                };
                self.repository.list_page(&query).await
            }
        };

        match result {
            Ok(items) => {
                info!("Loaded {} media items", items.len());
                self.items = items;
                Ok(self.items.len())
            }
            Err(e) => {
                self.status = Some(e.status_message(LOAD_FAILED));
                Err(e)
            }
        }
    }

    /// Change the search text without fetching
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Submit a search: back to page 1, refetching when the server filters
    pub async fn search(&mut self, query: impl Into<String>) -> Result<usize, ClientError> {
        self.set_query(query);
        self.pagination.reset();
        match self.source {
            FeedSource::Full => Ok(self.visible().len()),
            FeedSource::Paged => self.refresh().await,
        }
    }

    pub async fn next_page(&mut self) -> Result<usize, ClientError> {
        self.pagination.next();
        self.refresh_page().await
    }

    pub async fn prev_page(&mut self) -> Result<usize, ClientError> {
        self.pagination.prev();
        self.refresh_page().await
    }

    pub async fn go_to_page(&mut self, page: u32) -> Result<usize, ClientError> {
        self.pagination.go_to(page);
        self.refresh_page().await
    }

    async fn refresh_page(&mut self) -> Result<usize, ClientError> {
        match self.source {
            FeedSource::Full => Ok(self.visible().len()),
            FeedSource::Paged => self.refresh().await,
        }
    }

    /// Items to display for the current query
    pub fn visible(&self) -> Vec<&Media> {
        match self.source {
            FeedSource::Full => filter_media(&self.items, &self.query),
            FeedSource::Paged => self.items.iter().collect(),
        }
    }

    pub fn items(&self) -> &[Media] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.pagination.page()
    }

    pub fn source(&self) -> FeedSource {
        self.source
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

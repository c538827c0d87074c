//! Detail view of one media item: comments and ratings
//!
//! Comments and the rating aggregate load concurrently and independently; a
//! failure of either is logged and leaves the other untouched. All loads run
//! under the view's cancellation token, and once the view is closed their
//! results are dropped instead of being applied.

use std::future::Future;

use common::error::StatusMessage;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    error::{MediaError, MediaResult},
    models::{Comment, Media, RatingSummary, RatingValue},
    repositories::{CommentRepository, RatingRepository},
};

pub const COMMENT_REQUIRED: &str = "Comment text is required";
pub const COMMENT_FAILED: &str = "Failed to comment";
pub const RATING_FAILED: &str = "Failed to rate";

/// Result of a (re)load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Completed,
    /// The view was closed before the responses arrived
    Cancelled,
}

/// Detail view state for a single media item
#[derive(Debug)]
pub struct DetailView {
    media: Media,
    comments_repo: CommentRepository,
    ratings_repo: RatingRepository,
    cancel: CancellationToken,
    comments: Vec<Comment>,
    rating: RatingSummary,
    my_rating: Option<RatingValue>,
    draft: String,
    status: Option<String>,
}

impl DetailView {
    pub fn new(
        media: Media,
        comments_repo: CommentRepository,
        ratings_repo: RatingRepository,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            media,
            comments_repo,
            ratings_repo,
            cancel,
            comments: Vec::new(),
            rating: RatingSummary::default(),
            my_rating: None,
            draft: String::new(),
            status: None,
        }
    }

    /// Fetch comments and rating aggregate concurrently
    pub async fn load(&mut self) -> LoadOutcome {
        let id = self.media.id.clone();
        let (comments, rating) = tokio::join!(
            unless_cancelled(&self.cancel, self.comments_repo.list(&id)),
            unless_cancelled(&self.cancel, self.ratings_repo.summary(&id)),
        );

        if self.cancel.is_cancelled() {
            debug!("Detail view for {} closed before load finished", id);
            return LoadOutcome::Cancelled;
        }

        if let Some(comments) = comments {
            self.apply_comments(comments);
        }
        if let Some(rating) = rating {
            self.apply_rating(rating);
        }
        LoadOutcome::Completed
    }

    /// Refetch the comment list
    pub async fn reload_comments(&mut self) -> LoadOutcome {
        let id = self.media.id.clone();
        match unless_cancelled(&self.cancel, self.comments_repo.list(&id)).await {
            Some(result) if !self.cancel.is_cancelled() => {
                self.apply_comments(result);
                LoadOutcome::Completed
            }
            _ => LoadOutcome::Cancelled,
        }
    }

    /// Refetch the rating aggregate
    pub async fn reload_rating(&mut self) -> LoadOutcome {
        let id = self.media.id.clone();
        match unless_cancelled(&self.cancel, self.ratings_repo.summary(&id)).await {
            Some(result) if !self.cancel.is_cancelled() => {
                self.apply_rating(result);
                LoadOutcome::Completed
            }
            _ => LoadOutcome::Cancelled,
        }
    }

    fn apply_comments(&mut self, result: common::error::ClientResult<Vec<Comment>>) {
        match result {
            Ok(comments) => self.comments = comments,
            Err(e) => debug!("Ignoring comment load failure for {}: {}", self.media.id, e),
        }
    }

    fn apply_rating(&mut self, result: common::error::ClientResult<RatingSummary>) {
        match result {
            Ok(rating) => self.rating = rating,
            Err(e) => debug!("Ignoring rating load failure for {}: {}", self.media.id, e),
        }
    }

    /// Replace the comment draft
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Post the trimmed draft
    ///
    /// A blank draft is refused without a request. On success the draft is
    /// cleared and the list refreshed; on failure the draft is kept.
    pub async fn post_comment(&mut self) -> MediaResult<()> {
        let text = self.draft.trim().to_string();
        if text.is_empty() {
            return Err(MediaError::Validation(COMMENT_REQUIRED.to_string()));
        }

        self.status = None;
        match self.comments_repo.create(&self.media.id, &text).await {
            Ok(()) => {
                self.draft.clear();
                self.reload_comments().await;
                self.status = Some("Comment added".to_string());
                Ok(())
            }
            Err(e) => {
                self.status = Some(e.status_message(COMMENT_FAILED));
                Err(e.into())
            }
        }
    }

    /// Submit a rating, recording it locally before the request
    ///
    /// The local value is kept even when the request fails.
    pub async fn submit_rating(&mut self, value: RatingValue) -> MediaResult<()> {
        self.status = None;
        self.my_rating = Some(value);

        match self.ratings_repo.submit(&self.media.id, value).await {
            Ok(()) => {
                self.reload_rating().await;
                self.status = Some("Rated".to_string());
                Ok(())
            }
            Err(e) => {
                self.status = Some(e.status_message(RATING_FAILED));
                Err(e.into())
            }
        }
    }

    /// Tear the view down; pending and later loads are discarded
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn media(&self) -> &Media {
        &self.media
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn rating(&self) -> RatingSummary {
        self.rating
    }

    pub fn my_rating(&self) -> Option<RatingValue> {
        self.my_rating
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// Run `future` unless `cancel` fires first
async fn unless_cancelled<F: Future>(cancel: &CancellationToken, future: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        output = future => Some(output),
    }
}

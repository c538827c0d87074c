//! Media flows for the PhotoApp client
//!
//! Models and response normalization for media, comments and ratings, the
//! repositories over the backend endpoints, and the three view states built
//! on them: the consumer [`feed::Feed`], the creator [`upload::Uploader`] and
//! the per-item [`detail::DetailView`].

pub mod detail;
pub mod error;
pub mod feed;
pub mod image;
pub mod models;
pub mod payload;
pub mod repositories;
pub mod upload;

pub use error::{MediaError, MediaResult};
pub use models::{Comment, Media, MediaId, RatingSummary, RatingValue, ResourceId};

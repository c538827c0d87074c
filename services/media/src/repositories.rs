//! Repositories over the backend's media, comment and rating endpoints
//!
//! Each repository decodes the backend's response into one of the shapes in
//! [`crate::payload`] and hands back the client's own models.

pub mod comments;
pub mod media;
pub mod ratings;

use serde::Serialize;

use crate::models::MediaId;

pub use comments::CommentRepository;
pub use media::MediaRepository;
pub use ratings::RatingRepository;

/// `?photoId=` query selecting the item a comment or rating belongs to
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhotoQuery<'a> {
    photo_id: &'a MediaId,
}

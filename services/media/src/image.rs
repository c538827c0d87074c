//! Image URL resolution for media records

use common::config::BlobStorageConfig;

use crate::models::{Media, non_empty};

/// Text shown in place of an image that cannot be resolved
pub const IMAGE_PLACEHOLDER: &str = "No image URL";

/// Resolves the displayable URL of a media record
#[derive(Debug, Clone)]
pub struct ImageResolver {
    storage: BlobStorageConfig,
}

impl ImageResolver {
    pub fn new(storage: BlobStorageConfig) -> Self {
        Self { storage }
    }

    /// First of `blobUrl`, `url`, `imageUrl`, then the storage URL of `blobName`
    pub fn resolve(&self, media: &Media) -> Option<String> {
        non_empty(&media.blob_url)
            .or_else(|| non_empty(&media.url))
            .or_else(|| non_empty(&media.image_url))
            .map(str::to_string)
            .or_else(|| non_empty(&media.blob_name).map(|name| self.storage.blob_url(name)))
    }

    /// Resolved URL, or the placeholder text
    pub fn resolve_or_placeholder(&self, media: &Media) -> String {
        self.resolve(media)
            .unwrap_or_else(|| IMAGE_PLACEHOLDER.to_string())
    }
}

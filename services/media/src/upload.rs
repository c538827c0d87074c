//! Creator upload flow

use std::path::Path;

use common::{error::StatusMessage, http::ApiClient};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::info;

use crate::{
    error::{MediaError, MediaResult},
    models::MediaId,
};

pub const UPLOAD_PATH: &str = "/upload";

/// Status shown when no file was chosen
pub const FILE_REQUIRED: &str = "Please choose a file";
/// Status shown when the backend gives no reason for a failed upload
pub const UPLOAD_FAILED: &str = "Upload failed";

/// Image selected for upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// File contents with a MIME type guessed from the name
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Read a file from disk
    pub async fn from_path(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::from_bytes(file_name, bytes))
    }
}

/// Upload form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub file: Option<UploadFile>,
    pub title: String,
    pub caption: String,
    pub location: String,
    /// Comma-separated names
    pub people: String,
}

/// Acknowledgement of a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    /// Id of the created media record, when the backend reports one
    pub media_id: Option<MediaId>,
}

impl UploadReceipt {
    /// Confirmation line shown to the creator
    pub fn message(&self) -> String {
        match &self.media_id {
            Some(id) => format!("Uploaded successfully. ID: {id}"),
            None => "Uploaded successfully".to_string(),
        }
    }
}

/// Submits upload forms to the backend
#[derive(Debug, Clone)]
pub struct Uploader {
    api: ApiClient,
}

impl Uploader {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submit `form` as one multipart request
    ///
    /// Without a file nothing is sent. The form is cleared on success and left
    /// untouched on failure.
    pub async fn submit(&self, form: &mut UploadForm) -> MediaResult<UploadReceipt> {
        let Some(file) = &form.file else {
            return Err(MediaError::Validation(FILE_REQUIRED.to_string()));
        };

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime)
            .map_err(common::error::ClientError::Transport)?;

        let multipart = Form::new()
            .part("file", part)
            .text("title", form.title.clone())
            .text("caption", form.caption.clone())
            .text("location", form.location.clone())
            .text("people", form.people.clone());

        info!("Uploading {} ({} bytes)", file.file_name, file.bytes.len());
        let ack: Value = self.api.post_multipart(UPLOAD_PATH, multipart).await?;

        let receipt = UploadReceipt {
            media_id: ack
                .get("media")
                .and_then(|media| media.get("id"))
                .and_then(|id| serde_json::from_value(id.clone()).ok()),
        };

        *form = UploadForm::default();
        Ok(receipt)
    }
}

/// Status line for a finished upload attempt
pub fn upload_status(result: &MediaResult<UploadReceipt>) -> String {
    match result {
        Ok(receipt) => receipt.message(),
        Err(e) => e.status_message(UPLOAD_FAILED),
    }
}

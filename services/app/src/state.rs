//! Application state shared across commands

use std::sync::Arc;

use anyhow::Result;
use auth::SessionManager;
use common::{
    config::ClientConfig,
    http::{ApiClient, BearerToken},
    storage::KeyValueStore,
};
use media::{
    Media,
    detail::DetailView,
    feed::Feed,
    image::ImageResolver,
    repositories::{CommentRepository, MediaRepository, RatingRepository},
    upload::Uploader,
};
use tokio_util::sync::CancellationToken;

use crate::dashboard::View;

/// Application state shared across commands
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub session: SessionManager,
    pub images: ImageResolver,
    /// Cancelled on interrupt; every detail view runs under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Build the client stack and restore the session persisted in `store`
    pub fn new(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let api = ApiClient::new(&config.api, BearerToken::default())?;
        let session = SessionManager::restore(store, api.clone())?;
        let images = ImageResolver::new(config.storage.clone());

        Ok(Self {
            config,
            api,
            session,
            images,
            shutdown: CancellationToken::new(),
        })
    }

    /// View for the currently signed-in user
    pub fn view(&self) -> View {
        View::for_user(self.session.current_user().as_ref())
    }

    pub fn feed(&self) -> Feed {
        Feed::new(MediaRepository::new(self.api.clone()), &self.config.feed)
    }

    pub fn uploader(&self) -> Uploader {
        Uploader::new(self.api.clone())
    }

    pub fn detail(&self, media: Media) -> DetailView {
        DetailView::new(
            media,
            CommentRepository::new(self.api.clone()),
            RatingRepository::new(self.api.clone()),
            self.shutdown.child_token(),
        )
    }
}

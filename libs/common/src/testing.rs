//! In-process fake backend for tests
//!
//! Serves an `axum` router on an ephemeral local port and counts every request
//! it receives, so tests can assert that a flow issued no request at all.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};
use tokio::{net::TcpListener, task::JoinHandle};

use crate::config::ApiConfig;

/// Fake photo backend bound to `127.0.0.1`
pub struct FakeBackend {
    base_url: String,
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl FakeBackend {
    /// Serve `router` until the backend is dropped
    pub async fn spawn(router: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = router.layer(middleware::from_fn_with_state(
            hits.clone(),
            count_requests,
        ));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fake backend");
        let addr = listener
            .local_addr()
            .expect("fake backend has no local address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            handle,
        }
    }

    /// API configuration pointing at this backend
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
        }
    }

    /// Number of requests received so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn count_requests(
    State(hits): State<Arc<AtomicUsize>>,
    request: Request,
    next: Next,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

//! Detail view against a fake backend

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use common::{
    http::{ApiClient, BearerToken},
    testing::FakeBackend,
};
use media::{
    Media, MediaError, RatingValue, ResourceId,
    detail::{DetailView, LoadOutcome},
    repositories::{CommentRepository, RatingRepository},
};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Canned responses and recorded writes shared with the handlers
#[derive(Clone)]
struct Backend {
    rating: Value,
    rating_delay: Duration,
    comments_fail: bool,
    writes_fail: bool,
    comments: Arc<Mutex<Vec<Value>>>,
    posted: Arc<Mutex<Vec<Value>>>,
}

impl Backend {
    fn new(rating: Value) -> Self {
        Self {
            rating,
            rating_delay: Duration::ZERO,
            comments_fail: false,
            writes_fail: false,
            comments: Arc::new(Mutex::new(vec![json!({ "id": 1, "text": "nice" })])),
            posted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn router(self) -> Router {
        Router::new()
            .route("/api/comments", get(list_comments).post(post_comment))
            .route("/api/ratings", get(get_rating).post(post_rating))
            .with_state(self)
    }
}

async fn list_comments(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if backend.comments_fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
    }
    if params.get("photoId").map(String::as_str) != Some("42") {
        return (StatusCode::OK, Json(json!({ "items": [] })));
    }
    let items = backend.comments.lock().unwrap().clone();
    (StatusCode::OK, Json(json!({ "items": items })))
}

async fn post_comment(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.posted.lock().unwrap().push(body.clone());
    if backend.writes_fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "database unavailable" })),
        );
    }
    let mut comments = backend.comments.lock().unwrap();
    let id = comments.len() + 1;
    comments.push(json!({ "id": id, "text": body["text"] }));
    (StatusCode::CREATED, Json(json!({ "ok": true })))
}

async fn get_rating(State(backend): State<Backend>) -> Json<Value> {
    tokio::time::sleep(backend.rating_delay).await;
    Json(backend.rating.clone())
}

async fn post_rating(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.posted.lock().unwrap().push(body);
    if backend.writes_fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "rating service down" })),
        );
    }
    (StatusCode::OK, Json(json!({ "ok": true })))
}

fn view(backend: &FakeBackend, cancel: CancellationToken) -> DetailView {
    let api = ApiClient::new(&backend.api_config(), BearerToken::default()).unwrap();
    DetailView::new(
        Media::with_id(ResourceId::Number(42)),
        CommentRepository::new(api.clone()),
        RatingRepository::new(api),
        cancel,
    )
}

#[tokio::test]
async fn lists_comments_and_rating_aggregate() {
    let backend = FakeBackend::spawn(Backend::new(json!({ "avg": 4.5, "count": 2 })).router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    assert_eq!(detail.load().await, LoadOutcome::Completed);
    assert_eq!(detail.comments().len(), 1);
    assert_eq!(detail.comments()[0].text, "nice");
    assert_eq!(detail.rating().to_string(), "Rating: 4.5 (2)");
    assert_eq!(backend.hits(), 2);
}

#[tokio::test]
async fn unreadable_comment_is_skipped() {
    let backend = Backend::new(json!({ "items": [{ "value": "3" }, { "value": 0, "rating": 5 }] }));
    backend.comments.lock().unwrap().extend([
        json!({ "id": 2, "text": { "rich": true } }),
        json!({ "id": 3, "comment": "legacy" }),
    ]);
    let backend = FakeBackend::spawn(backend.router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    detail.load().await;
    let texts: Vec<_> = detail.comments().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["nice", "legacy"]);
    assert_eq!(detail.rating().to_string(), "Rating: 4.0 (2)");
}

#[tokio::test]
async fn averages_raw_rating_items() {
    let rating = json!({ "items": [{ "value": 3 }, { "value": 5 }] });
    let backend = FakeBackend::spawn(Backend::new(rating).router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    detail.load().await;
    assert_eq!(detail.rating().average, 4.0);
    assert_eq!(detail.rating().to_string(), "Rating: 4.0 (2)");
}

#[tokio::test]
async fn one_failed_fetch_does_not_block_the_other() {
    let mut state = Backend::new(json!({ "average": 3.0 }));
    state.comments_fail = true;
    let backend = FakeBackend::spawn(state.router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    assert_eq!(detail.load().await, LoadOutcome::Completed);
    assert!(detail.comments().is_empty());
    assert_eq!(detail.rating().average, 3.0);
    assert_eq!(detail.status(), None);
}

#[tokio::test]
async fn closed_view_discards_late_responses() {
    let mut state = Backend::new(json!({ "avg": 4.5, "count": 2 }));
    state.rating_delay = Duration::from_secs(5);
    let backend = FakeBackend::spawn(state.router()).await;

    let cancel = CancellationToken::new();
    let mut detail = view(&backend, cancel.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
    });

    assert_eq!(detail.load().await, LoadOutcome::Cancelled);
    assert!(detail.comments().is_empty());
    assert_eq!(detail.rating().count, 0);
}

#[tokio::test]
async fn load_after_close_sends_nothing() {
    let backend = FakeBackend::spawn(Backend::new(json!({})).router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    detail.close();
    assert_eq!(detail.load().await, LoadOutcome::Cancelled);
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn blank_comment_issues_no_request() {
    let backend = FakeBackend::spawn(Backend::new(json!({})).router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    detail.set_draft("   \n\t");
    let err = detail.post_comment().await.unwrap_err();
    assert!(matches!(err, MediaError::Validation(_)));
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn posted_comment_is_trimmed_and_list_refreshed() {
    let state = Backend::new(json!({}));
    let posted = state.posted.clone();
    let backend = FakeBackend::spawn(state.router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    detail.set_draft("  great shot  ");
    detail.post_comment().await.unwrap();

    assert_eq!(
        posted.lock().unwrap().as_slice(),
        &[json!({ "photoId": 42, "text": "great shot" })]
    );
    assert_eq!(detail.draft(), "");
    assert_eq!(detail.status(), Some("Comment added"));
    let texts: Vec<_> = detail.comments().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["nice", "great shot"]);
}

#[tokio::test]
async fn failed_comment_keeps_draft() {
    let mut state = Backend::new(json!({}));
    state.writes_fail = true;
    let backend = FakeBackend::spawn(state.router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    detail.set_draft("lovely");
    assert!(detail.post_comment().await.is_err());
    assert_eq!(detail.draft(), "lovely");
    assert_eq!(detail.status(), Some("database unavailable"));
}

#[tokio::test]
async fn rating_is_recorded_locally_even_when_the_request_fails() {
    let mut state = Backend::new(json!({ "avg": 2.0, "count": 1 }));
    state.writes_fail = true;
    let posted = state.posted.clone();
    let backend = FakeBackend::spawn(state.router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    let four = RatingValue::try_from(4).unwrap();
    assert!(detail.submit_rating(four).await.is_err());

    assert_eq!(detail.my_rating(), Some(four));
    assert_eq!(detail.status(), Some("rating service down"));
    assert_eq!(
        posted.lock().unwrap().as_slice(),
        &[json!({ "photoId": 42, "rating": 4 })]
    );
}

#[tokio::test]
async fn successful_rating_refreshes_aggregate() {
    let backend = FakeBackend::spawn(Backend::new(json!({ "avg": 4.5, "count": 2 })).router()).await;
    let mut detail = view(&backend, CancellationToken::new());

    detail.submit_rating(RatingValue::try_from(5).unwrap()).await.unwrap();

    assert_eq!(detail.my_rating().map(RatingValue::get), Some(5));
    assert_eq!(detail.rating().to_string(), "Rating: 4.5 (2)");
    assert_eq!(detail.status(), Some("Rated"));
}

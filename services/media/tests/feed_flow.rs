//! Consumer feed against a fake backend, in both listing variants

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use common::{
    config::{FeedConfig, FeedSource},
    http::{ApiClient, BearerToken},
    testing::FakeBackend,
};
use media::{feed::Feed, repositories::MediaRepository};
use serde_json::{Value, json};

type Queries = Arc<Mutex<Vec<HashMap<String, String>>>>;

fn photos() -> Value {
    json!({
        "items": [
            { "id": 1, "title": "Sunset", "location": "Lisbon", "blobUrl": "https://cdn/1.jpg" },
            { "id": 2, "title": "Harbour", "caption": "Boats", "people": "Bob" },
            { "id": 3, "blobName": "3.jpg" },
        ]
    })
}

async fn paged(
    State(queries): State<Queries>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    queries.lock().unwrap().push(params.clone());
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    if page > 1 {
        return Json(json!({ "ok": true, "page": page, "items": [] }));
    }
    Json(json!({ "ok": true, "page": 1, "limit": 10, "count": 1, "items": [{ "id": "a", "title": "Only" }] }))
}

fn feed(backend: &FakeBackend, source: FeedSource) -> Feed {
    let api = ApiClient::new(&backend.api_config(), BearerToken::default()).unwrap();
    Feed::new(
        MediaRepository::new(api),
        &FeedConfig {
            source,
            page_size: 10,
        },
    )
}

#[tokio::test]
async fn full_listing_is_filtered_on_the_client() {
    let router = Router::new().route("/api/photos", get(|| async { Json(photos()) }));
    let backend = FakeBackend::spawn(router).await;
    let mut feed = feed(&backend, FeedSource::Full);

    assert_eq!(feed.refresh().await.unwrap(), 3);
    assert_eq!(feed.visible().len(), 3);

    assert_eq!(feed.search("BOB").await.unwrap(), 1);
    assert_eq!(feed.visible()[0].display_title(), "Harbour");

    feed.set_query("");
    assert_eq!(feed.visible().len(), 3);
    // Searching the full listing never refetches
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn unreadable_record_does_not_hide_the_listing() {
    let router = Router::new().route(
        "/api/photos",
        get(|| async {
            Json(json!({ "items": [
                { "id": 1, "title": "Sunset" },
                { "id": 2, "title": "Harbour" },
                { "title": "legacy record without id" },
            ]}))
        }),
    );
    let backend = FakeBackend::spawn(router).await;
    let mut feed = feed(&backend, FeedSource::Full);

    assert_eq!(feed.refresh().await.unwrap(), 2);
    assert_eq!(feed.visible().len(), 2);
    assert_eq!(feed.visible()[1].display_title(), "Harbour");
    assert_eq!(feed.status(), None);
}

#[tokio::test]
async fn paged_listing_sends_page_limit_and_search() {
    let queries: Queries = Arc::default();
    let router = Router::new()
        .route("/api/media", get(paged))
        .with_state(queries.clone());
    let backend = FakeBackend::spawn(router).await;
    let mut feed = feed(&backend, FeedSource::Paged);

    assert_eq!(feed.search("only").await.unwrap(), 1);
    assert_eq!(feed.page(), 1);

    assert_eq!(feed.next_page().await.unwrap(), 0);
    assert_eq!(feed.page(), 2);
    assert!(feed.visible().is_empty());

    feed.prev_page().await.unwrap();
    feed.prev_page().await.unwrap();
    assert_eq!(feed.page(), 1);

    let queries = queries.lock().unwrap();
    assert_eq!(queries[0]["page"], "1");
    assert_eq!(queries[0]["limit"], "10");
    assert_eq!(queries[0]["search"], "only");
    assert_eq!(queries[1]["page"], "2");
    assert_eq!(queries.len(), 4);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_items() {
    let calls = Arc::new(Mutex::new(0));
    let router = Router::new()
        .route(
            "/api/photos",
            get(|State(calls): State<Arc<Mutex<u32>>>| async move {
                let mut calls = calls.lock().unwrap();
                *calls += 1;
                if *calls == 1 {
                    (StatusCode::OK, Json(photos()))
                } else {
                    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})))
                }
            }),
        )
        .with_state(calls);
    let backend = FakeBackend::spawn(router).await;
    let mut feed = feed(&backend, FeedSource::Full);

    feed.refresh().await.unwrap();
    assert!(feed.refresh().await.is_err());

    assert_eq!(feed.items().len(), 3);
    assert_eq!(
        feed.status(),
        Some("Request failed with status code 503")
    );
}

#[tokio::test]
async fn unreachable_backend_reports_transport_error() {
    let api = ApiClient::new(
        &common::config::ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
        },
        BearerToken::default(),
    )
    .unwrap();
    let mut feed = Feed::new(
        MediaRepository::new(api),
        &FeedConfig {
            source: FeedSource::Full,
            page_size: 10,
        },
    );

    assert!(feed.refresh().await.is_err());
    assert!(feed.status().is_some());
    assert!(feed.items().is_empty());
}

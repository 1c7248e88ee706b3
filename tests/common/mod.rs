//! In-process stand-ins for the four upstream services.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Datelike, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mission_control::config::{Identities, TelemetryConfig, UpstreamUrls};
use mission_control::state::{AppState, SharedState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Ok,
    ServerError,
    Malformed,
    /// Challenge-platform style `{"status": "error"}` / bridge status other than "ok".
    ErrorPayload,
}

#[derive(Default)]
pub struct Hits {
    pub contributions: AtomicUsize,
    pub repos: AtomicUsize,
    pub leetcode: AtomicUsize,
    pub medium: AtomicUsize,
    pub youtube: AtomicUsize,
}

impl Hits {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

pub struct Modes {
    pub contributions: Mode,
    pub repos: Mode,
    pub leetcode: Mode,
    pub medium: Mode,
    pub youtube: Mode,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            contributions: Mode::Ok,
            repos: Mode::Ok,
            leetcode: Mode::Ok,
            medium: Mode::Ok,
            youtube: Mode::Ok,
        }
    }
}

pub struct FakeUpstreams {
    pub modes: Modes,
    pub hits: Hits,
}

pub const CURRENT_YEAR_COMMITS: u64 = 100;
pub const LAST_YEAR_COMMITS: u64 = 50;

pub async fn spawn_fake_upstreams(modes: Modes) -> (SocketAddr, Arc<FakeUpstreams>) {
    let fake = Arc::new(FakeUpstreams {
        modes,
        hits: Hits::default(),
    });

    let router = Router::new()
        .route("/contributions/{user}", get(contributions))
        .route("/api/users/{user}/repos", get(repos))
        .route("/leetcode/{user}", get(leetcode))
        .route("/rss", get(rss))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (addr, fake)
}

/// An address nothing listens on, for connection-refused failures.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn upstream_urls(addr: SocketAddr) -> UpstreamUrls {
    UpstreamUrls {
        contributions: format!("http://{}/contributions", addr),
        github_api: format!("http://{}/api", addr),
        leetcode: format!("http://{}/leetcode", addr),
        rss_bridge: format!("http://{}/rss", addr),
    }
}

pub fn test_config(upstreams: UpstreamUrls, cache_ttl_secs: u64, youtube: &str) -> TelemetryConfig {
    TelemetryConfig {
        port: 0,
        identities: Identities {
            github_username: "octocat".to_string(),
            leetcode_username: "octocoder".to_string(),
            medium_username: "octowriter".to_string(),
            youtube_channel_id: youtube.to_string(),
        },
        upstreams,
        cache_ttl_secs,
        refresh_in_background: false,
        upstream_timeout_secs: 5,
        log_dir: None,
    }
}

pub fn test_state(config: TelemetryConfig) -> SharedState {
    Arc::new(AppState::new(config).expect("http client should build"))
}

fn respond(mode: Mode, ok: serde_json::Value, error_payload: serde_json::Value) -> Response {
    match mode {
        Mode::Ok => Json(ok).into_response(),
        Mode::ServerError => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        Mode::Malformed => (StatusCode::OK, "{\"status\": \"ok\", \"items\": [").into_response(),
        Mode::ErrorPayload => Json(error_payload).into_response(),
    }
}

async fn contributions(
    State(fake): State<Arc<FakeUpstreams>>,
    Path(_user): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    fake.hits.contributions.fetch_add(1, Ordering::SeqCst);
    assert_eq!(query.get("y").map(String::as_str), Some("last"));

    let year = Utc::now().year();
    let mut total = serde_json::Map::new();
    total.insert(year.to_string(), json!(CURRENT_YEAR_COMMITS));
    total.insert((year - 1).to_string(), json!(LAST_YEAR_COMMITS));
    total.insert((year - 2).to_string(), json!(9999));

    respond(
        fake.modes.contributions,
        json!({
            "total": total,
            "contributions": [
                {"date": "2024-06-01", "count": 0, "level": 0},
                {"date": "2024-06-02", "count": 3, "level": 1},
                {"date": "2024-06-03", "count": 12, "level": 4}
            ]
        }),
        json!({"error": "not found"}),
    )
}

async fn repos(
    State(fake): State<Arc<FakeUpstreams>>,
    Path(_user): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    fake.hits.repos.fetch_add(1, Ordering::SeqCst);
    assert_eq!(query.get("per_page").map(String::as_str), Some("100"));
    assert_eq!(query.get("sort").map(String::as_str), Some("updated"));

    let repos: Vec<_> = ["A", "A", "B", "C", "C", "C"]
        .iter()
        .enumerate()
        .map(|(i, lang)| json!({"name": format!("repo-{}", i), "language": lang}))
        .collect();

    respond(
        fake.modes.repos,
        json!(repos),
        json!({"message": "API rate limit exceeded"}),
    )
}

async fn leetcode(State(fake): State<Arc<FakeUpstreams>>, Path(_user): Path<String>) -> Response {
    fake.hits.leetcode.fetch_add(1, Ordering::SeqCst);
    respond(
        fake.modes.leetcode,
        json!({
            "status": "success",
            "totalSolved": 150,
            "easySolved": 80,
            "mediumSolved": 60,
            "hardSolved": 10,
            "ranking": 300000
        }),
        json!({"status": "error", "message": "user does not exist"}),
    )
}

async fn rss(
    State(fake): State<Arc<FakeUpstreams>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let feed = query.get("rss_url").cloned().unwrap_or_default();
    let bridge_error = json!({"status": "error", "message": "Cannot download feed", "items": []});

    if feed.starts_with("https://medium.com/feed/@") {
        fake.hits.medium.fetch_add(1, Ordering::SeqCst);
        // Items past the third are incomplete and must never be decoded
        let items: Vec<_> = (1..=5)
            .map(|n| {
                if n <= 3 {
                    json!({
                        "title": format!("Post {}", n),
                        "link": format!("https://medium.com/@octowriter/post-{}", n),
                        "pubDate": format!("2024-05-0{} 1{}:30:45", n, n)
                    })
                } else {
                    json!({"title": null, "link": null, "pubDate": null})
                }
            })
            .collect();
        respond(
            fake.modes.medium,
            json!({"status": "ok", "items": items}),
            bridge_error,
        )
    } else if feed.starts_with("https://www.youtube.com/feeds/videos.xml?channel_id=") {
        fake.hits.youtube.fetch_add(1, Ordering::SeqCst);
        respond(
            fake.modes.youtube,
            json!({
                "status": "ok",
                "items": [
                    {"title": "Newest", "link": "https://www.youtube.com/watch?v=abc123", "pubDate": "2024-07-04 09:00:00"},
                    {"title": "Older", "link": "https://www.youtube.com/watch?v=def456", "pubDate": "2024-06-01 09:00:00", "thumbnail": "https://i.ytimg.com/vi/def456/hqdefault.jpg"}
                ]
            }),
            bridge_error,
        )
    } else {
        (StatusCode::BAD_REQUEST, "unknown feed").into_response()
    }
}

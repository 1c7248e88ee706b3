//! Client for the RSS-to-JSON bridge shared by the blog and video sources.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::MAX_FEED_ITEMS;
use crate::error::UpstreamError;

use super::get_json;

const BRIDGE_OK: &str = "ok";

#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Left undecoded so items past the ones we keep cannot fail the feed.
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub pub_date: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Fetch `feed_url` through the bridge. A bridge status other than "ok" is an empty feed.
pub async fn fetch_feed(
    client: &Client,
    bridge_url: &str,
    feed_url: &str,
    source_name: &'static str,
) -> Result<Vec<FeedItem>, UpstreamError> {
    let request = client.get(bridge_url).query(&[("rss_url", feed_url)]);
    let feed: FeedResponse = get_json(request, source_name).await?;
    feed_items(feed, source_name)
}

/// Decode the leading items in feed order. Later items are never inspected.
pub fn feed_items(
    feed: FeedResponse,
    source_name: &'static str,
) -> Result<Vec<FeedItem>, UpstreamError> {
    match (feed.status.as_deref(), feed.items) {
        (Some(BRIDGE_OK), Some(items)) => items
            .into_iter()
            .take(MAX_FEED_ITEMS)
            .map(|item| {
                serde_json::from_value(item).map_err(|e| UpstreamError::Decode {
                    source_name,
                    message: e.to_string(),
                })
            })
            .collect(),
        (status, _) => {
            debug!(
                "{} feed empty (bridge status {:?}, message {:?})",
                source_name, status, feed.message
            );
            Ok(Vec::new())
        }
    }
}

/// Parse a feed publish timestamp. The bridge emits `YYYY-MM-DD HH:MM:SS` in UTC;
/// raw feeds use RFC 2822 or RFC 3339.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// `YYYY.MM.DD`
pub fn dotted_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y.%m.%d").to_string()
}

/// `HH:MM:SS`
pub fn clock_time(dt: &DateTime<Utc>) -> String {
    dt.format("%H:%M:%S").to_string()
}

pub(crate) fn unparseable_date(source_name: &'static str, raw: &str) -> UpstreamError {
    UpstreamError::Decode {
        source_name,
        message: format!("unparseable pubDate {:?}", raw),
    }
}

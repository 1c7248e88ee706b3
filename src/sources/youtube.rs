use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{UpstreamUrls, MAX_FEED_ITEMS};
use crate::error::UpstreamError;
use crate::models::VideoEntry;

use super::rss::{self, FeedItem};

const SOURCE: &str = "youtube";

pub fn feed_url(channel_id: &str) -> String {
    format!(
        "https://www.youtube.com/feeds/videos.xml?channel_id={}",
        channel_id
    )
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/mqdefault.jpg", video_id)
}

/// Text after the first `v=` up to the next `v=`, or empty.
pub fn extract_video_id(link: &str) -> &str {
    link.split("v=").nth(1).unwrap_or("")
}

pub async fn fetch_videos(
    client: &Client,
    upstreams: &UpstreamUrls,
    channel_id: &str,
) -> Result<Vec<VideoEntry>, UpstreamError> {
    let items =
        rss::fetch_feed(client, &upstreams.rss_bridge, &feed_url(channel_id), SOURCE).await?;
    normalize_videos(items)
}

/// No channel configured means no request and no videos.
pub async fn videos_or_fallback(
    client: &Client,
    upstreams: &UpstreamUrls,
    channel_id: Option<&str>,
) -> Vec<VideoEntry> {
    let Some(channel_id) = channel_id else {
        debug!("No YouTube channel configured, skipping video feed");
        return Vec::new();
    };

    fetch_videos(client, upstreams, channel_id)
        .await
        .unwrap_or_else(|e| {
            warn!("YouTube videos unavailable for {}: {}", channel_id, e);
            Vec::new()
        })
}

pub fn normalize_videos(items: Vec<FeedItem>) -> Result<Vec<VideoEntry>, UpstreamError> {
    items
        .into_iter()
        .take(MAX_FEED_ITEMS)
        .map(|item| {
            let published = rss::parse_pub_date(&item.pub_date)
                .ok_or_else(|| rss::unparseable_date(SOURCE, &item.pub_date))?;
            let video_id = extract_video_id(&item.link).to_string();
            let thumbnail = match item.thumbnail {
                Some(t) if !t.is_empty() => t,
                _ => thumbnail_url(&video_id),
            };
            Ok(VideoEntry {
                title: item.title,
                published_at: rss::dotted_date(&published),
                thumbnail,
                video_id,
            })
        })
        .collect()
}

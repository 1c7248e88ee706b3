use reqwest::Client;
use tracing::warn;

use crate::config::{UpstreamUrls, MAX_FEED_ITEMS};
use crate::error::UpstreamError;
use crate::models::BlogPost;

use super::rss::{self, FeedItem};

const SOURCE: &str = "medium";

pub fn feed_url(username: &str) -> String {
    format!("https://medium.com/feed/@{}", username)
}

pub async fn fetch_posts(
    client: &Client,
    upstreams: &UpstreamUrls,
    username: &str,
) -> Result<Vec<BlogPost>, UpstreamError> {
    let items = rss::fetch_feed(client, &upstreams.rss_bridge, &feed_url(username), SOURCE).await?;
    normalize_posts(items)
}

pub async fn posts_or_fallback(
    client: &Client,
    upstreams: &UpstreamUrls,
    username: &str,
) -> Vec<BlogPost> {
    fetch_posts(client, upstreams, username)
        .await
        .unwrap_or_else(|e| {
            warn!("Medium posts unavailable for {}: {}", username, e);
            Vec::new()
        })
}

/// First posts in feed order. One unparseable date rejects the whole feed.
pub fn normalize_posts(items: Vec<FeedItem>) -> Result<Vec<BlogPost>, UpstreamError> {
    items
        .into_iter()
        .take(MAX_FEED_ITEMS)
        .map(|item| {
            let published = rss::parse_pub_date(&item.pub_date)
                .ok_or_else(|| rss::unparseable_date(SOURCE, &item.pub_date))?;
            Ok(BlogPost {
                title: item.title,
                date: rss::dotted_date(&published),
                time: rss::clock_time(&published),
                link: item.link,
            })
        })
        .collect()
}

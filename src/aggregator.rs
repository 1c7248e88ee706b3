use reqwest::Client;
use std::time::Instant;
use tracing::info;

use crate::config::TelemetryConfig;
use crate::models::TelemetryPayload;
use crate::sources::{github, leetcode, medium, youtube};

/// Fetch every source concurrently and compose the payload.
///
/// Each branch converts its own failure into a fallback value before the join,
/// so this cannot fail and no source can cut another short.
pub async fn collect_telemetry(client: &Client, config: &TelemetryConfig) -> TelemetryPayload {
    let started = Instant::now();
    let ids = &config.identities;
    let upstreams = &config.upstreams;

    let (github, leetcode, medium, youtube) = tokio::join!(
        github::code_activity_or_fallback(client, upstreams, &ids.github_username),
        leetcode::profile_or_fallback(client, upstreams, &ids.leetcode_username),
        medium::posts_or_fallback(client, upstreams, &ids.medium_username),
        youtube::videos_or_fallback(client, upstreams, config.youtube_channel()),
    );

    info!(
        "Telemetry collected in {}ms: {} contribution days, {} posts, video={}",
        started.elapsed().as_millis(),
        github.contributions.len(),
        medium.len(),
        !youtube.is_empty()
    );

    TelemetryPayload {
        github,
        leetcode,
        medium,
        youtube: youtube.into_iter().next(),
    }
}

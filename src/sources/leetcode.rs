use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::config::{UpstreamUrls, RANKING_POPULATION};
use crate::error::UpstreamError;
use crate::models::{ChallengeProfile, RANKING_UNAVAILABLE};

use super::get_json;

const SOURCE: &str = "leetcode";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeStats {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_solved: Option<u64>,
    #[serde(default)]
    pub easy_solved: Option<u64>,
    #[serde(default)]
    pub medium_solved: Option<u64>,
    #[serde(default)]
    pub hard_solved: Option<u64>,
    #[serde(default)]
    pub ranking: Option<u64>,
}

pub async fn fetch_profile(
    client: &Client,
    upstreams: &UpstreamUrls,
    username: &str,
) -> Result<ChallengeProfile, UpstreamError> {
    let url = format!("{}/{}", upstreams.leetcode, username);
    let stats: LeetCodeStats = get_json(client.get(&url), SOURCE).await?;
    normalize_profile(stats)
}

pub async fn profile_or_fallback(
    client: &Client,
    upstreams: &UpstreamUrls,
    username: &str,
) -> ChallengeProfile {
    fetch_profile(client, upstreams, username)
        .await
        .unwrap_or_else(|e| {
            warn!("LeetCode profile unavailable for {}: {}", username, e);
            ChallengeProfile::fallback()
        })
}

pub fn normalize_profile(stats: LeetCodeStats) -> Result<ChallengeProfile, UpstreamError> {
    if stats.status.as_deref() == Some("error") {
        return Err(UpstreamError::Payload {
            source_name: SOURCE,
            message: stats.message.unwrap_or_else(|| "status \"error\"".to_string()),
        });
    }

    Ok(ChallengeProfile {
        total_solved: stats.total_solved.unwrap_or(0),
        easy: stats.easy_solved.unwrap_or(0),
        medium: stats.medium_solved.unwrap_or(0),
        hard: stats.hard_solved.unwrap_or(0),
        ranking: format_ranking(stats.ranking),
    })
}

/// Approximate percentile against a fixed population; "N/A" without a rank.
pub fn format_ranking(rank: Option<u64>) -> String {
    match rank {
        Some(rank) if rank > 0 => {
            let percent = (rank as f64 / RANKING_POPULATION * 100.0).round();
            format!("Top {}%", percent as u64)
        }
        _ => RANKING_UNAVAILABLE.to_string(),
    }
}

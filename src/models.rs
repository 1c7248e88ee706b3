//! Normalized shapes returned by `GET /telemetry`.
//!
//! Every type here has a fallback value so a payload can always be composed,
//! even when every upstream fails. Fallbacks are indistinguishable from genuine
//! zero/empty data on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TOP_LANGUAGES;

/// Code-hosting activity: commit totals, language mix and the contribution graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeActivitySummary {
    pub total_commits: u64,
    /// Estimated from the repository count, not a real pull request count.
    pub prs_merged: u64,
    pub top_languages: Vec<String>,
    pub contributions: Vec<ContributionDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u64,
    /// Relative intensity bucket, 0..=4.
    pub level: u8,
}

impl CodeActivitySummary {
    pub fn fallback() -> Self {
        Self {
            total_commits: 0,
            prs_merged: 0,
            top_languages: default_top_languages(),
            contributions: Vec::new(),
        }
    }
}

pub fn default_top_languages() -> Vec<String> {
    DEFAULT_TOP_LANGUAGES.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeProfile {
    pub total_solved: u64,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    /// `"Top N%"` or `"N/A"`.
    pub ranking: String,
}

pub const RANKING_UNAVAILABLE: &str = "N/A";

impl ChallengeProfile {
    pub fn fallback() -> Self {
        Self {
            total_solved: 0,
            easy: 0,
            medium: 0,
            hard: 0,
            ranking: RANKING_UNAVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    /// `YYYY.MM.DD`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    pub title: String,
    pub video_id: String,
    /// `YYYY.MM.DD`
    pub published_at: String,
    pub thumbnail: String,
}

/// The combined response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPayload {
    pub github: CodeActivitySummary,
    pub leetcode: ChallengeProfile,
    pub medium: Vec<BlogPost>,
    pub youtube: Option<VideoEntry>,
}

impl TelemetryPayload {
    /// Payload with every source at its fallback value.
    #[allow(dead_code)]
    pub fn fallback() -> Self {
        Self {
            github: CodeActivitySummary::fallback(),
            leetcode: ChallengeProfile::fallback(),
            medium: Vec::new(),
            youtube: None,
        }
    }
}

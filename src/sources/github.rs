use chrono::{Datelike, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::{
    UpstreamUrls, MAX_CONTRIBUTION_LEVEL, MAX_TOP_LANGUAGES, PRS_MERGED_CAP, PRS_MERGED_PER_REPO,
};
use crate::error::UpstreamError;
use crate::models::{CodeActivitySummary, ContributionDay};

use super::get_json;

const CONTRIBUTIONS_SOURCE: &str = "contributions";
const REPOS_SOURCE: &str = "repositories";

/// Contributions graph for the last year, keyed totals per year.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsResponse {
    #[serde(default)]
    pub total: HashMap<String, u64>,
    #[serde(default)]
    pub contributions: Vec<RawContribution>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawContribution {
    pub date: NaiveDate,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    #[serde(default)]
    pub language: Option<String>,
}

pub async fn fetch_contributions(
    client: &Client,
    upstreams: &UpstreamUrls,
    username: &str,
) -> Result<ContributionsResponse, UpstreamError> {
    let url = format!("{}/{}", upstreams.contributions, username);
    get_json(client.get(&url).query(&[("y", "last")]), CONTRIBUTIONS_SOURCE).await
}

pub async fn fetch_repos(
    client: &Client,
    upstreams: &UpstreamUrls,
    username: &str,
) -> Result<Vec<RepoSummary>, UpstreamError> {
    let url = format!("{}/users/{}/repos", upstreams.github_api, username);
    let request = client
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .query(&[("per_page", "100"), ("sort", "updated")]);
    get_json(request, REPOS_SOURCE).await
}

/// Fetch both sub-sources concurrently. A failure in one does not affect the other.
pub async fn code_activity_or_fallback(
    client: &Client,
    upstreams: &UpstreamUrls,
    username: &str,
) -> CodeActivitySummary {
    let (contributions, repos) = tokio::join!(
        fetch_contributions(client, upstreams, username),
        fetch_repos(client, upstreams, username),
    );

    let contributions = contributions
        .map_err(|e| warn!("GitHub contributions unavailable for {}: {}", username, e))
        .ok();
    let repos = repos
        .map_err(|e| warn!("GitHub repositories unavailable for {}: {}", username, e))
        .ok();

    summarize(contributions, repos.as_deref(), Utc::now().year())
}

/// Build the summary from whichever sub-sources succeeded.
pub fn summarize(
    contributions: Option<ContributionsResponse>,
    repos: Option<&[RepoSummary]>,
    current_year: i32,
) -> CodeActivitySummary {
    let mut summary = CodeActivitySummary::fallback();

    if let Some(data) = contributions {
        summary.total_commits = total_commits(&data.total, current_year);
        summary.contributions = data
            .contributions
            .into_iter()
            .map(|c| ContributionDay {
                date: c.date,
                count: c.count,
                level: c.level.min(MAX_CONTRIBUTION_LEVEL),
            })
            .collect();
    }

    if let Some(repos) = repos {
        let languages = top_languages(repos.iter().filter_map(|r| r.language.as_deref()));
        if !languages.is_empty() {
            summary.top_languages = languages;
        }
        summary.prs_merged = estimate_prs_merged(repos.len());
        debug!(
            "Repository listing: {} repos, top languages {:?}",
            repos.len(),
            summary.top_languages
        );
    }

    summary
}

/// Sum of this year's and last year's totals; missing years count as zero.
pub fn total_commits(totals: &HashMap<String, u64>, current_year: i32) -> u64 {
    let year_total = |year: i32| totals.get(&year.to_string()).copied().unwrap_or(0);
    year_total(current_year) + year_total(current_year - 1)
}

/// The most frequent languages, first-seen order breaking ties.
pub fn top_languages<'a>(languages: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for lang in languages.into_iter().filter(|l| !l.is_empty()) {
        match counts.iter_mut().find(|(seen, _)| *seen == lang) {
            Some((_, n)) => *n += 1,
            None => counts.push((lang, 1)),
        }
    }

    // sort_by is stable, so equal counts keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_TOP_LANGUAGES)
        .map(|(lang, _)| lang.to_string())
        .collect()
}

/// Heuristic: two merged PRs per public repository, capped.
pub fn estimate_prs_merged(repo_count: usize) -> u64 {
    (repo_count as u64 * PRS_MERGED_PER_REPO).min(PRS_MERGED_CAP)
}

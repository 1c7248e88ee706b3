use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{TelemetryConfig, USER_AGENT};
use crate::telemetry_cache::TelemetryCache;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: TelemetryConfig,
    pub http_client: reqwest::Client,
    pub cache: TelemetryCache,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: TelemetryConfig) -> Result<Self, reqwest::Error> {
        let http_client = build_http_client(&config)?;
        Ok(Self {
            config,
            http_client,
            cache: TelemetryCache::new(),
            started_at: Utc::now(),
        })
    }
}

/// One pooled client shared by every source. The repository API rejects
/// requests without a User-Agent.
pub fn build_http_client(config: &TelemetryConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .pool_max_idle_per_host(4)
        .build()
}

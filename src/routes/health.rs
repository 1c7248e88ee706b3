use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub started_at: String,
    pub cache: CacheHealth,
    pub sources: SourcesHealth,
}

#[derive(Serialize)]
pub struct CacheHealth {
    pub enabled: bool,
    pub populated: bool,
    pub age_secs: Option<u64>,
    pub ttl_secs: u64,
    pub background_refresh: bool,
}

#[derive(Serialize)]
pub struct SourcesHealth {
    pub github_username: String,
    pub leetcode_username: String,
    pub medium_username: String,
    pub youtube_configured: bool,
}

/// GET /health — liveness plus cache state. Never touches upstreams.
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let age = state.cache.age().await;
    let config = &state.config;

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at.to_rfc3339(),
        cache: CacheHealth {
            enabled: config.caching_enabled(),
            populated: age.is_some(),
            age_secs: age.map(|a| a.as_secs()),
            ttl_secs: config.cache_ttl_secs,
            background_refresh: config.refresh_in_background,
        },
        sources: SourcesHealth {
            github_username: config.identities.github_username.clone(),
            leetcode_username: config.identities.leetcode_username.clone(),
            medium_username: config.identities.medium_username.clone(),
            youtube_configured: config.youtube_channel().is_some(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serializes_to_json() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            started_at: "2024-01-01T00:00:00+00:00".to_string(),
            cache: CacheHealth {
                enabled: true,
                populated: false,
                age_secs: None,
                ttl_secs: 3600,
                background_refresh: false,
            },
            sources: SourcesHealth {
                github_username: "octocat".to_string(),
                leetcode_username: "octocat".to_string(),
                medium_username: "octocat".to_string(),
                youtube_configured: false,
            },
        };

        let json = serde_json::to_string(&response).expect("should serialize");
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"populated\":false"));
        assert!(json.contains("\"age_secs\":null"));
        assert!(json.contains("\"ttl_secs\":3600"));
        assert!(json.contains("\"youtube_configured\":false"));
    }
}

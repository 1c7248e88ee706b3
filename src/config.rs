use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Mission Control — aggregates third-party profile statistics for the portfolio dashboard.
#[derive(Parser, Debug, Clone)]
#[command(name = "mission-control")]
pub struct CliArgs {
    /// HTTP port to listen on
    #[arg(long = "port", env = "MC_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Code-hosting (GitHub) username
    #[arg(long = "github-username", env = "MC_GITHUB_USERNAME", default_value = DEFAULT_GITHUB_USERNAME)]
    pub github_username: String,

    /// Coding-challenge (LeetCode) username
    #[arg(long = "leetcode-username", env = "MC_LEETCODE_USERNAME", default_value = DEFAULT_LEETCODE_USERNAME)]
    pub leetcode_username: String,

    /// Blog (Medium) username, without the leading '@'
    #[arg(long = "medium-username", env = "MC_MEDIUM_USERNAME", default_value = DEFAULT_MEDIUM_USERNAME)]
    pub medium_username: String,

    /// Video channel (YouTube) id; the video source is skipped when empty
    #[arg(long = "youtube-channel-id", env = "MC_YOUTUBE_CHANNEL_ID", default_value = "")]
    pub youtube_channel_id: String,

    /// Seconds a composed payload stays fresh (0 disables caching)
    #[arg(long = "cache-ttl-secs", env = "MC_CACHE_TTL_SECS", default_value_t = CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    /// Re-aggregate on a timer instead of on the first stale request
    #[arg(long = "refresh-in-background", env = "MC_REFRESH_IN_BACKGROUND")]
    pub refresh_in_background: bool,

    /// Per-request timeout for upstream calls
    #[arg(long = "upstream-timeout-secs", env = "MC_UPSTREAM_TIMEOUT_SECS", default_value_t = UPSTREAM_TIMEOUT_SECS)]
    pub upstream_timeout_secs: u64,

    /// Directory for daily-rotated log files (stdout only when unset)
    #[arg(short = 'l', long = "log-dir", env = "MC_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[arg(long = "contributions-base-url", env = "MC_CONTRIBUTIONS_BASE_URL", default_value = CONTRIBUTIONS_API_BASE, hide = true)]
    pub contributions_base_url: String,

    #[arg(long = "github-api-base-url", env = "MC_GITHUB_API_BASE_URL", default_value = GITHUB_API_BASE, hide = true)]
    pub github_api_base_url: String,

    #[arg(long = "leetcode-base-url", env = "MC_LEETCODE_BASE_URL", default_value = LEETCODE_API_BASE, hide = true)]
    pub leetcode_base_url: String,

    #[arg(long = "rss-bridge-url", env = "MC_RSS_BRIDGE_URL", default_value = RSS_BRIDGE_URL, hide = true)]
    pub rss_bridge_url: String,
}

/// Who to report on.
#[derive(Debug, Clone)]
pub struct Identities {
    pub github_username: String,
    pub leetcode_username: String,
    pub medium_username: String,
    /// Empty means "no channel configured".
    pub youtube_channel_id: String,
}

/// Base URLs of the upstream services. Overridable so tests can point them at local doubles.
#[derive(Debug, Clone)]
pub struct UpstreamUrls {
    pub contributions: String,
    pub github_api: String,
    pub leetcode: String,
    pub rss_bridge: String,
}

impl Default for UpstreamUrls {
    fn default() -> Self {
        Self {
            contributions: CONTRIBUTIONS_API_BASE.to_string(),
            github_api: GITHUB_API_BASE.to_string(),
            leetcode: LEETCODE_API_BASE.to_string(),
            rss_bridge: RSS_BRIDGE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub port: u16,
    pub identities: Identities,
    pub upstreams: UpstreamUrls,
    pub cache_ttl_secs: u64,
    pub refresh_in_background: bool,
    pub upstream_timeout_secs: u64,
    pub log_dir: Option<PathBuf>,
}

// Port
pub const DEFAULT_PORT: u16 = 8787;

// Identities
pub const DEFAULT_GITHUB_USERNAME: &str = "CumaKaradash";
pub const DEFAULT_LEETCODE_USERNAME: &str = "vOiwSJATNl";
pub const DEFAULT_MEDIUM_USERNAME: &str = "cumakaradash";

// Upstream endpoints
pub const CONTRIBUTIONS_API_BASE: &str = "https://github-contributions-api.jogruber.de/v4";
pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const LEETCODE_API_BASE: &str = "https://leetcode-stats-api.herokuapp.com";
pub const RSS_BRIDGE_URL: &str = "https://api.rss2json.com/v1/api.json";
pub const USER_AGENT: &str = concat!("mission-control/", env!("CARGO_PKG_VERSION"));

// Cache / transport
pub const CACHE_TTL_SECS: u64 = 3600;
pub const UPSTREAM_TIMEOUT_SECS: u64 = 10;

// Normalization constants
pub const MAX_FEED_ITEMS: usize = 3;
pub const MAX_TOP_LANGUAGES: usize = 3;
pub const DEFAULT_TOP_LANGUAGES: &[&str] = &["JavaScript", "TypeScript", "Python"];
pub const PRS_MERGED_PER_REPO: u64 = 2;
pub const PRS_MERGED_CAP: u64 = 100;
pub const RANKING_POPULATION: f64 = 3_000_000.0;
pub const MAX_CONTRIBUTION_LEVEL: u8 = 4;

impl TelemetryConfig {
    pub fn from_args(args: CliArgs) -> Self {
        TelemetryConfig {
            port: args.port,
            identities: Identities {
                github_username: args.github_username,
                leetcode_username: args.leetcode_username,
                medium_username: args.medium_username,
                youtube_channel_id: args.youtube_channel_id.trim().to_string(),
            },
            upstreams: UpstreamUrls {
                contributions: trim_base(args.contributions_base_url),
                github_api: trim_base(args.github_api_base_url),
                leetcode: trim_base(args.leetcode_base_url),
                rss_bridge: args.rss_bridge_url,
            },
            cache_ttl_secs: args.cache_ttl_secs,
            refresh_in_background: args.refresh_in_background,
            upstream_timeout_secs: args.upstream_timeout_secs,
            log_dir: args.log_dir,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn caching_enabled(&self) -> bool {
        self.cache_ttl_secs > 0
    }

    /// The video channel, if one is configured.
    pub fn youtube_channel(&self) -> Option<&str> {
        let id = self.identities.youtube_channel_id.as_str();
        (!id.is_empty()).then_some(id)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

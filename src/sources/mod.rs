//! Upstream sources. Each module exposes a fallible `fetch_*` and an infallible
//! `*_or_fallback` that logs the failure and substitutes the source's fallback value.

pub mod github;
pub mod leetcode;
pub mod medium;
pub mod rss;
pub mod youtube;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::UpstreamError;

/// Send a request and decode a JSON body, mapping non-2xx statuses and bad bodies to errors.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    source_name: &'static str,
) -> Result<T, UpstreamError> {
    let response = request.send().await?;
    let status = response.status();
    debug!("{} responded with {}", source_name, status);

    if !status.is_success() {
        return Err(UpstreamError::Status {
            source_name,
            status,
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode {
        source_name,
        message: e.to_string(),
    })
}

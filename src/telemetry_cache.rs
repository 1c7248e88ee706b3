use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::aggregator;
use crate::error::TelemetryError;
use crate::models::TelemetryPayload;
use crate::state::SharedState;

#[derive(Clone, Debug)]
pub struct CachedTelemetry {
    pub payload: TelemetryPayload,
    pub fetched_at: Instant,
}

/// Last composed payload plus a lock that makes refreshes single-flight.
#[derive(Default)]
pub struct TelemetryCache {
    entry: RwLock<Option<CachedTelemetry>>,
    refresh_lock: Mutex<()>,
}

impl TelemetryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached payload if it is younger than `ttl`.
    pub async fn fresh(&self, ttl: Duration) -> Option<TelemetryPayload> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < ttl)
            .map(|cached| cached.payload.clone())
    }

    pub async fn store(&self, payload: TelemetryPayload) {
        let mut entry = self.entry.write().await;
        *entry = Some(CachedTelemetry {
            payload,
            fetched_at: Instant::now(),
        });
    }

    pub async fn age(&self) -> Option<Duration> {
        self.entry
            .read()
            .await
            .as_ref()
            .map(|cached| cached.fetched_at.elapsed())
    }
}

/// Serve from cache when fresh, otherwise aggregate once and store the result.
pub async fn get_or_refresh(state: &SharedState) -> Result<TelemetryPayload, TelemetryError> {
    if !state.config.caching_enabled() {
        return aggregate_in_task(state).await;
    }

    let ttl = state.config.cache_ttl();
    if let Some(payload) = state.cache.fresh(ttl).await {
        debug!("Serving cached telemetry");
        return Ok(payload);
    }

    let _refresh = state.cache.refresh_lock.lock().await;
    // Another request may have refreshed while we waited for the lock
    if let Some(payload) = state.cache.fresh(ttl).await {
        return Ok(payload);
    }

    refresh_locked(state).await
}

/// Aggregate unconditionally and store. Used by the background refresher.
pub async fn refresh(state: &SharedState) -> Result<TelemetryPayload, TelemetryError> {
    let _refresh = state.cache.refresh_lock.lock().await;
    refresh_locked(state).await
}

async fn refresh_locked(state: &SharedState) -> Result<TelemetryPayload, TelemetryError> {
    let payload = aggregate_in_task(state).await?;
    state.cache.store(payload.clone()).await;
    Ok(payload)
}

async fn aggregate_in_task(state: &SharedState) -> Result<TelemetryPayload, TelemetryError> {
    let state = state.clone();
    run_aggregation(async move {
        aggregator::collect_telemetry(&state.http_client, &state.config).await
    })
    .await
}

/// Drive an aggregation on its own task. A panic inside it becomes `TelemetryError::Join`.
pub async fn run_aggregation<F>(aggregation: F) -> Result<TelemetryPayload, TelemetryError>
where
    F: Future<Output = TelemetryPayload> + Send + 'static,
{
    Ok(tokio::spawn(aggregation).await?)
}

/// Re-aggregate once per TTL so requests are served from a warm cache.
/// The first tick fires immediately.
pub fn spawn_telemetry_refresher(state: SharedState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = state.config.cache_ttl();
        info!("Background telemetry refresh every {}s", period.as_secs());
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match refresh(&state).await {
                Ok(_) => debug!("Telemetry cache refreshed"),
                Err(e) => warn!("Background telemetry refresh failed: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_cache_is_not_fresh() {
        let cache = TelemetryCache::new();
        assert!(cache.fresh(Duration::from_secs(60)).await.is_none());
        assert!(cache.age().await.is_none());
    }

    #[tokio::test]
    async fn test_stored_payload_is_fresh_within_ttl() {
        let cache = TelemetryCache::new();
        cache.store(TelemetryPayload::fallback()).await;

        let payload = cache.fresh(Duration::from_secs(60)).await;
        assert_eq!(payload, Some(TelemetryPayload::fallback()));
        assert!(cache.age().await.is_some());
    }

    #[tokio::test]
    async fn test_zero_ttl_is_never_fresh() {
        let cache = TelemetryCache::new();
        cache.store(TelemetryPayload::fallback()).await;
        assert!(cache.fresh(Duration::ZERO).await.is_none());
    }
}

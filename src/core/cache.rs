use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Entries younger than this are served without a provider call.
pub const FRESHNESS_WINDOW: Duration = Duration::minutes(5);

/// Ordered currency pair. `USD-EUR` and `EUR-USD` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    pub from: String,
    pub to: String,
}

impl PairKey {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedRate {
    pub rate: f64,
    pub observed_at: DateTime<Utc>,
}

impl CachedRate {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        is_fresh(self.observed_at, now)
    }
}

pub fn is_fresh(observed_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - observed_at < FRESHNESS_WINDOW
}

/// In-memory store of the last observed rate per pair.
///
/// Entries are overwritten, never evicted. Stale entries stay around so the
/// resolver can fall back to them when a provider fails.
#[derive(Clone, Default)]
pub struct RateCache {
    inner: Arc<Mutex<HashMap<PairKey, CachedRate>>>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry regardless of its age.
    pub async fn get(&self, key: &PairKey) -> Option<CachedRate> {
        let cache = self.inner.lock().await;
        let value = cache.get(key).copied();
        if value.is_some() {
            debug!("Cache HIT for {}", key);
        } else {
            debug!("Cache MISS for {}", key);
        }
        value
    }

    pub async fn put(&self, key: PairKey, rate: f64, now: DateTime<Utc>) {
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for {}: {}", key, rate);
        cache.insert(
            key,
            CachedRate {
                rate,
                observed_at: now,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

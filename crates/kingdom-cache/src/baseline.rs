//! Baseline trajectory cache.
//!
//! Uses `moka::sync::Cache::try_get_with`: concurrent misses on one key are
//! coalesced into a single evaluation, failures are never stored, and
//! different keys do not wait on each other. Entries are never invalidated;
//! only a configured capacity bound evicts them.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use kingdom_core::config::CacheConfig;
use kingdom_core::errors::{KingdomError, KingdomResult};
use kingdom_core::models::BaselineTrajectory;
use kingdom_observability::cache_span;
use kingdom_observability::tracing_setup::events;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// `get_or_compute` calls.
    pub requests: u64,
    /// Compute closures actually run, successful or not.
    pub computations: u64,
    /// Compute closures that returned an error.
    pub failures: u64,
}

impl CacheStats {
    /// Requests answered without running a computation of their own.
    pub fn served_from_cache(&self) -> u64 {
        self.requests.saturating_sub(self.computations)
    }
}

/// Cache key for `(scenario_id, time_horizon)`: blake3 hex digest.
///
/// The id is length-prefixed so no two pairs share a preimage.
pub fn cache_key(scenario_id: &str, time_horizon: u32) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(scenario_id.len() as u64).to_le_bytes());
    hasher.update(scenario_id.as_bytes());
    hasher.update(&time_horizon.to_le_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Memoizes baseline trajectories, one computation per key.
pub struct BaselineCache {
    cache: Cache<String, Arc<BaselineTrajectory>>,
    requests: AtomicU64,
    computations: AtomicU64,
    failures: AtomicU64,
}

impl BaselineCache {
    /// Unbounded unless `config.max_capacity` is set.
    pub fn new(config: &CacheConfig) -> KingdomResult<Self> {
        config.validate()?;
        let mut builder = Cache::builder();
        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }
        Ok(Self {
            cache: builder.build(),
            requests: AtomicU64::new(0),
            computations: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        })
    }

    /// Cached trajectory for the key, computing it with `compute` on a miss.
    ///
    /// Concurrent callers on a cold key block until the one running
    /// `compute` finishes and then share its result. If `compute` fails,
    /// nothing is cached, every waiter gets `KeyComputationFailure`, and the
    /// next call computes again.
    pub fn get_or_compute<F, E>(
        &self,
        scenario_id: &str,
        time_horizon: u32,
        compute: F,
    ) -> KingdomResult<Arc<BaselineTrajectory>>
    where
        F: FnOnce() -> Result<Vec<f64>, E>,
        E: Display + Send + Sync + 'static,
    {
        let span = cache_span!(scenario_id, time_horizon);
        let _guard = span.enter();
        self.requests.fetch_add(1, Ordering::Relaxed);

        self.cache
            .try_get_with(cache_key(scenario_id, time_horizon), || {
                self.computations.fetch_add(1, Ordering::Relaxed);
                debug!(scenario_id, time_horizon, "computing baseline trajectory");
                match compute() {
                    Ok(values) => Ok(Arc::new(BaselineTrajectory {
                        scenario_id: scenario_id.to_string(),
                        time_horizon,
                        values,
                    })),
                    Err(e) => {
                        self.failures.fetch_add(1, Ordering::Relaxed);
                        Err(e)
                    }
                }
            })
            .map_err(|e: Arc<E>| {
                let reason = e.to_string();
                events::baseline_failed(scenario_id, time_horizon, &reason);
                KingdomError::KeyComputationFailure {
                    scenario_id: scenario_id.to_string(),
                    time_horizon,
                    reason,
                }
            })
    }

    /// Cached trajectory, if present. Never computes.
    pub fn get(&self, scenario_id: &str, time_horizon: u32) -> Option<Arc<BaselineTrajectory>> {
        self.cache.get(&cache_key(scenario_id, time_horizon))
    }

    pub fn contains(&self, scenario_id: &str, time_horizon: u32) -> bool {
        self.cache.contains_key(&cache_key(scenario_id, time_horizon))
    }

    /// Number of cached trajectories.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            requests: self.requests.load(Ordering::Relaxed),
            computations: self.computations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

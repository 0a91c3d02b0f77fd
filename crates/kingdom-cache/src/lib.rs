//! # kingdom-cache
//!
//! Baseline trajectories depend only on `(scenario_id, time_horizon)` and
//! are expensive to compute, so they are computed at most once per key and
//! shared between queries.

pub mod baseline;

pub use baseline::{cache_key, BaselineCache, CacheStats};

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{KingdomError, KingdomResult};

/// Baseline cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of trajectories held. `None` keeps the cache unbounded.
    pub max_capacity: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: defaults::DEFAULT_CACHE_MAX_CAPACITY,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> KingdomResult<()> {
        if self.max_capacity == Some(0) {
            return Err(KingdomError::InvalidConfiguration {
                reason: "cache max_capacity must be positive when set".to_string(),
            });
        }
        Ok(())
    }
}

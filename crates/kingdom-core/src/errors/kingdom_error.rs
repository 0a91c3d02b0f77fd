use super::CalibrationError;

/// Top-level error type for the Kingdom routing engine.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum KingdomError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("malformed estimate: {reason}")]
    MalformedEstimate { reason: String },

    #[error("baseline computation failed for scenario {scenario_id} at horizon {time_horizon}: {reason}")]
    KeyComputationFailure {
        scenario_id: String,
        time_horizon: u32,
        reason: String,
    },

    #[error("calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("{tier} tier failed: {reason}")]
    TierFailure { tier: String, reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("config error: {0}")]
    ConfigError(String),
}

/// Convenience type alias.
pub type KingdomResult<T> = Result<T, KingdomError>;

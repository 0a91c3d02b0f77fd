//! Span definitions per operation: decision, routing, calibration, validation, cache.

/// Create a decision span.
#[macro_export]
macro_rules! decision_span {
    ($severity:expr, $uncertainty:expr) => {
        tracing::info_span!(
            "kingdom.decision",
            severity = $severity,
            uncertainty = $uncertainty
        )
    };
}

/// Create a routing span around one tiered query.
#[macro_export]
macro_rules! routing_span {
    ($scenario_id:expr, $time_horizon:expr) => {
        tracing::info_span!(
            "kingdom.routing",
            scenario_id = %$scenario_id,
            time_horizon = $time_horizon
        )
    };
}

/// Create a calibration span.
#[macro_export]
macro_rules! calibration_span {
    ($regressor:expr, $n_calibration:expr) => {
        tracing::info_span!(
            "kingdom.calibration",
            regressor = %$regressor,
            n_calibration = $n_calibration
        )
    };
}

/// Create a validation span.
#[macro_export]
macro_rules! validation_span {
    ($n_cases:expr) => {
        tracing::info_span!("kingdom.validation", n_cases = $n_cases)
    };
}

/// Create a cache span.
#[macro_export]
macro_rules! cache_span {
    ($scenario_id:expr, $time_horizon:expr) => {
        tracing::debug_span!(
            "kingdom.cache",
            scenario_id = %$scenario_id,
            time_horizon = $time_horizon
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const DECISION: &str = "kingdom.decision";
    pub const ROUTING: &str = "kingdom.routing";
    pub const CALIBRATION: &str = "kingdom.calibration";
    pub const VALIDATION: &str = "kingdom.validation";
    pub const CACHE: &str = "kingdom.cache";
}

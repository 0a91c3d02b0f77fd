//! # kingdom-observability
//!
//! Structured tracing with span definitions and event helpers, plus the
//! routing metrics collector fed by the tiered router.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::RoutingMetrics;
pub use tracing_setup::init_tracing;

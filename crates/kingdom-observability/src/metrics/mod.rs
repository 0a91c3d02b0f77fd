//! Metrics collected while routing queries.

pub mod routing_metrics;

pub use routing_metrics::RoutingMetrics;

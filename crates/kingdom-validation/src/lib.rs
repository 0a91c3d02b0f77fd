//! # kingdom-validation
//!
//! Audits escalation decisions against ground truth from the high-fidelity
//! tier: per-case agreement and outcome, precision/recall/escalation rate,
//! per-segment breakdowns, replay of history through a policy, recalibration
//! of the probability band table, and a routing quality gate.

pub mod agreement;
pub mod metrics;
pub mod outcome;
pub mod quality;
pub mod recalibration;
pub mod validator;

pub use agreement::agreement;
pub use outcome::classify;
pub use quality::{assess_routing, RoutingAssessment};
pub use recalibration::{recalibrate_bands, BandAdjustment, BandRecalibration};
pub use validator::RetrospectiveValidator;

//! # kingdom-escalation
//!
//! Decides, per query, whether the screening estimate is good enough or the
//! high-fidelity tier must run.
//!
//! The decision is a value-of-information comparison between screening and
//! escalating, overridden by three governance triggers (stakes, boundary,
//! novelty) that force escalation on their own. [`TieredRouter`] wires the
//! decision between two estimator tiers.

pub mod bands;
pub mod engine;
pub mod router;
pub mod signals;
pub mod triggers;
pub mod voi;

pub use engine::EscalationEngine;
pub use router::{RoutedEstimate, TieredRouter};
pub use signals::ScreeningSignals;
pub use voi::VoiBreakdown;

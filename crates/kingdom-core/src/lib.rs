//! # kingdom-core
//!
//! Foundation crate for the Kingdom tiered decision-routing engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::KingdomConfig;
pub use errors::{KingdomError, KingdomResult};
pub use models::{DecisionResult, EscalationContext, IntervalEstimate, TriggerKind, ValidationCase};

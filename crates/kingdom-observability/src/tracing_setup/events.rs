//! Structured log events for key routing operations.
//!
//! Each function emits a `tracing` event with structured fields.

use kingdom_core::models::{DecisionResult, ValidationReport};

/// Log an escalation decision.
pub fn decision_made(decision: &DecisionResult) {
    tracing::debug!(
        event = "decision_made",
        escalate = decision.escalate,
        reason = decision.reason_label(),
        band = %decision.band,
        expected_voi = decision.expected_voi,
        "escalation decision"
    );
}

/// Log a high-fidelity tier invocation.
pub fn tier_escalated(scenario_id: &str, reason: &str) {
    tracing::info!(
        event = "tier_escalated",
        scenario_id = %scenario_id,
        reason = %reason,
        "query escalated to high-fidelity tier"
    );
}

/// Log a completed validation run.
pub fn validation_completed(report: &ValidationReport) {
    tracing::info!(
        event = "validation_completed",
        n_cases = report.n_cases,
        escalation_rate = report.escalation_rate,
        precision = report.precision,
        recall = report.recall,
        "retrospective validation completed"
    );
}

/// Log a probability band adjustment.
pub fn band_recalibrated(band: &str, previous: f64, updated: f64, n_cases: usize) {
    tracing::info!(
        event = "band_recalibrated",
        band = %band,
        previous = previous,
        updated = updated,
        n_cases = n_cases,
        "probability band recalibrated"
    );
}

/// Log a failed baseline computation.
pub fn baseline_failed(scenario_id: &str, time_horizon: u32, reason: &str) {
    tracing::warn!(
        event = "baseline_failed",
        scenario_id = %scenario_id,
        time_horizon = time_horizon,
        reason = %reason,
        "baseline computation failed"
    );
}

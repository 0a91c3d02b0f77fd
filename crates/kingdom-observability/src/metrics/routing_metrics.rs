//! Escalation rate, per-reason and per-band counts, VoI of escalated queries.

use std::collections::BTreeMap;

use kingdom_core::models::DecisionResult;
use serde::{Deserialize, Serialize};

/// Running totals over every decision the router has made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingMetrics {
    /// Total decisions recorded.
    pub decisions: u64,
    /// Decisions that escalated.
    pub escalations: u64,
    /// Decisions per reason label (`stakes`, `boundary`, `novelty`,
    /// `positive_voi`, `screening_sufficient`).
    pub by_reason: BTreeMap<String, u64>,
    /// Decisions per matched probability band.
    pub by_band: BTreeMap<String, u64>,
    /// Sum of expected VoI over escalated decisions.
    pub escalated_voi_sum: f64,
    /// Estimator calls that returned an error.
    pub tier_failures: u64,
}

impl RoutingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one decision.
    pub fn record(&mut self, decision: &DecisionResult) {
        self.decisions += 1;
        *self
            .by_reason
            .entry(decision.reason_label().to_string())
            .or_default() += 1;
        *self.by_band.entry(decision.band.clone()).or_default() += 1;
        if decision.escalate {
            self.escalations += 1;
            self.escalated_voi_sum += decision.expected_voi;
        }
    }

    pub fn record_tier_failure(&mut self) {
        self.tier_failures += 1;
    }

    /// Fraction of decisions that escalated.
    pub fn escalation_rate(&self) -> f64 {
        if self.decisions == 0 {
            return 0.0;
        }
        self.escalations as f64 / self.decisions as f64
    }

    /// Mean expected VoI over escalated decisions.
    pub fn mean_escalated_voi(&self) -> f64 {
        if self.escalations == 0 {
            return 0.0;
        }
        self.escalated_voi_sum / self.escalations as f64
    }

    pub fn reason_count(&self, label: &str) -> u64 {
        self.by_reason.get(label).copied().unwrap_or(0)
    }

    /// Serialize the current totals for export.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Reset all counters (useful for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

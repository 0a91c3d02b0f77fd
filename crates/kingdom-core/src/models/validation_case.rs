use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EscalationContext, IntervalEstimate};

/// A historical (screening, high-fidelity) pair and the decision taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationCase {
    #[serde(default)]
    pub case_id: Option<String>,
    /// Grouping label, e.g. a region or dike ring.
    #[serde(default)]
    pub segment: Option<String>,
    pub screening: IntervalEstimate,
    /// Ground truth from the high-fidelity tier.
    pub high_fidelity: IntervalEstimate,
    /// Whether the case was actually escalated.
    pub escalated: bool,
    /// Query context, required for replay through a policy.
    #[serde(default)]
    pub context: Option<EscalationContext>,
}

impl ValidationCase {
    pub fn new(screening: IntervalEstimate, high_fidelity: IntervalEstimate, escalated: bool) -> Self {
        Self {
            case_id: None,
            segment: None,
            screening,
            high_fidelity,
            escalated,
            context: None,
        }
    }

    pub fn with_id(mut self, case_id: impl Into<String>) -> Self {
        self.case_id = Some(case_id.into());
        self
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    pub fn with_context(mut self, context: EscalationContext) -> Self {
        self.context = Some(context);
        self
    }
}

/// Classification of one historical decision against ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationOutcome {
    /// Escalated, and screening disagreed with ground truth.
    CorrectEscalation,
    /// Escalated, but screening agreed.
    UnnecessaryEscalation,
    /// Not escalated, but screening disagreed.
    MissedEscalation,
    /// Not escalated, and screening agreed.
    SafeNonEscalation,
}

/// Aggregate routing-quality metrics over a set of cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub n_cases: usize,
    pub escalation_rate: f64,
    pub precision: f64,
    pub recall: f64,
    pub correct: usize,
    pub unnecessary: usize,
    pub missed: usize,
    pub safe: usize,
}

/// Summary of expected VoI over escalated decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Result of replaying historical cases through a policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Metrics computed from the replayed decisions.
    pub report: ValidationReport,
    /// Decisions per reason label (trigger name, `positive_voi`, `screening_sufficient`).
    pub reason_counts: BTreeMap<String, usize>,
    pub escalated_voi: VoiSummary,
    /// Fraction of replayed cases where the policy matched the recorded decision.
    pub decision_agreement: f64,
    /// `missed × cost_false_negative + unnecessary × cost_false_positive`.
    pub realized_regret: f64,
    /// Cases without a context, which cannot be replayed.
    pub skipped: usize,
}

//! Routing quality gate over a validation report.

use kingdom_core::config::ValidationConfig;
use kingdom_core::models::ValidationReport;
use serde::{Deserialize, Serialize};

/// Quality assessment of a routing policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingAssessment {
    pub precision_ok: bool,
    pub recall_ok: bool,
    pub escalation_rate_ok: bool,
    pub overall_pass: bool,
    /// Specific issues found.
    pub issues: Vec<String>,
}

/// Check `report` against the precision, recall and escalation-rate limits
/// in `thresholds`.
pub fn assess_routing(report: &ValidationReport, thresholds: &ValidationConfig) -> RoutingAssessment {
    let mut issues = Vec::new();

    let precision_ok = report.precision >= thresholds.min_precision;
    if !precision_ok {
        issues.push(format!(
            "precision {:.3} below minimum {:.3}",
            report.precision, thresholds.min_precision
        ));
    }

    let recall_ok = report.recall >= thresholds.min_recall;
    if !recall_ok {
        issues.push(format!(
            "recall {:.3} below minimum {:.3}: escalations are being missed",
            report.recall, thresholds.min_recall
        ));
    }

    let escalation_rate_ok = report.escalation_rate <= thresholds.max_escalation_rate;
    if !escalation_rate_ok {
        issues.push(format!(
            "escalation rate {:.3} above maximum {:.3}",
            report.escalation_rate, thresholds.max_escalation_rate
        ));
    }

    RoutingAssessment {
        precision_ok,
        recall_ok,
        escalation_rate_ok,
        overall_pass: precision_ok && recall_ok && escalation_rate_ok,
        issues,
    }
}

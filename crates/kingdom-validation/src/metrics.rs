//! Aggregate metrics from outcome counts.

use kingdom_core::models::{ValidationReport, VoiSummary};

use crate::outcome::OutcomeCounts;

/// `numerator / (denominator + ε)`; zero for an empty category.
fn guarded_ratio(numerator: usize, denominator: usize, epsilon: f64) -> f64 {
    numerator as f64 / (denominator as f64 + epsilon)
}

/// Escalation rate, precision and recall for `counts`.
pub fn build_report(counts: &OutcomeCounts, epsilon: f64) -> ValidationReport {
    let n_cases = counts.total();
    ValidationReport {
        n_cases,
        escalation_rate: guarded_ratio(counts.escalated(), n_cases, epsilon),
        precision: guarded_ratio(counts.correct, counts.correct + counts.unnecessary, epsilon),
        recall: guarded_ratio(counts.correct, counts.correct + counts.missed, epsilon),
        correct: counts.correct,
        unnecessary: counts.unnecessary,
        missed: counts.missed,
        safe: counts.safe,
    }
}

/// Count, mean, min and max of `values`; all zero when empty.
pub fn summarize_voi(values: &[f64]) -> VoiSummary {
    if values.is_empty() {
        return VoiSummary::default();
    }
    let count = values.len();
    VoiSummary {
        count,
        mean: values.iter().sum::<f64>() / count as f64,
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counts_give_zero_metrics() {
        let report = build_report(&OutcomeCounts::default(), 1e-9);
        assert_eq!(report.n_cases, 0);
        assert_eq!(report.precision, 0.0);
        assert_eq!(report.recall, 0.0);
        assert_eq!(report.escalation_rate, 0.0);
    }

    #[test]
    fn perfect_routing_is_near_one() {
        let counts = OutcomeCounts {
            correct: 4,
            unnecessary: 0,
            missed: 0,
            safe: 6,
        };
        let report = build_report(&counts, 1e-9);
        assert!((report.precision - 1.0).abs() < 1e-6);
        assert!((report.recall - 1.0).abs() < 1e-6);
        assert!((report.escalation_rate - 0.4).abs() < 1e-6);
    }

    #[test]
    fn voi_summary() {
        let s = summarize_voi(&[5.0, -1.0, 2.0]);
        assert_eq!(s.count, 3);
        assert_eq!(s.min, -1.0);
        assert_eq!(s.max, 5.0);
        assert!((s.mean - 2.0).abs() < 1e-12);
        assert_eq!(summarize_voi(&[]), VoiSummary::default());
    }
}

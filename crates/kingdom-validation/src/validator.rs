//! RetrospectiveValidator: scores recorded decisions and replays history
//! through a policy.

use std::collections::BTreeMap;

use kingdom_core::config::{EscalationConfig, ValidationConfig};
use kingdom_core::constants::UNLABELED_SEGMENT;
use kingdom_core::errors::{KingdomError, KingdomResult};
use kingdom_core::models::{
    DecisionResult, EscalationOutcome, ReplayReport, ValidationCase, ValidationReport,
};
use kingdom_core::traits::IEscalationPolicy;
use kingdom_observability::tracing_setup::events;
use kingdom_observability::validation_span;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::metrics::{build_report, summarize_voi};
use crate::outcome::{classify, classify_decision, OutcomeCounts};
use crate::recalibration::{recalibrate_bands, BandRecalibration};

/// Scores historical (screening, high-fidelity) pairs.
#[derive(Debug, Clone, Default)]
pub struct RetrospectiveValidator {
    config: ValidationConfig,
}

impl RetrospectiveValidator {
    pub fn new(config: ValidationConfig) -> KingdomResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Metrics over the decisions recorded in `cases`.
    ///
    /// Fails with `MalformedEstimate` if any case carries a malformed estimate.
    pub fn score(&self, cases: &[ValidationCase]) -> KingdomResult<ValidationReport> {
        let span = validation_span!(cases.len());
        let _guard = span.enter();

        let outcomes = cases
            .par_iter()
            .enumerate()
            .map(|(i, case)| check_case(i, case).map(|()| classify(case)))
            .collect::<KingdomResult<Vec<_>>>()?;
        let counts: OutcomeCounts = outcomes.into_iter().collect();
        let report = build_report(&counts, self.config.metric_epsilon);
        events::validation_completed(&report);
        Ok(report)
    }

    /// One report per segment label. Cases without a segment are grouped
    /// under `"unlabeled"`.
    pub fn score_by_segment(
        &self,
        cases: &[ValidationCase],
    ) -> KingdomResult<BTreeMap<String, ValidationReport>> {
        for (i, case) in cases.iter().enumerate() {
            check_case(i, case)?;
        }
        let mut by_segment: BTreeMap<String, OutcomeCounts> = BTreeMap::new();
        for case in cases {
            let segment = case.segment.as_deref().unwrap_or(UNLABELED_SEGMENT);
            by_segment
                .entry(segment.to_string())
                .or_default()
                .add(classify(case));
        }
        debug!(segments = by_segment.len(), "scored validation cases by segment");
        Ok(by_segment
            .into_iter()
            .map(|(segment, counts)| (segment, build_report(&counts, self.config.metric_epsilon)))
            .collect())
    }

    /// Re-decide every case that carries a context and score the replayed
    /// decisions against ground truth.
    ///
    /// Cases without a context are counted in `skipped`.
    pub fn replay(
        &self,
        policy: &dyn IEscalationPolicy,
        cases: &[ValidationCase],
    ) -> KingdomResult<ReplayReport> {
        let span = validation_span!(cases.len());
        let _guard = span.enter();

        let replayed = cases
            .par_iter()
            .enumerate()
            .filter_map(|(i, case)| case.context.as_ref().map(|ctx| (i, case, ctx)))
            .map(|(i, case, ctx)| -> KingdomResult<Replayed> {
                check_case(i, case)?;
                let decision = policy.decide(ctx, &case.screening)?;
                let outcome = classify_decision(case, decision.escalate);
                let regret = match outcome {
                    EscalationOutcome::MissedEscalation => ctx.cost_false_negative(),
                    EscalationOutcome::UnnecessaryEscalation => ctx.cost_false_positive(),
                    _ => 0.0,
                };
                Ok(Replayed {
                    decision,
                    outcome,
                    matches_record: decision_matches(case, outcome),
                    regret,
                })
            })
            .collect::<KingdomResult<Vec<_>>>()?;

        let skipped = cases.len() - replayed.len();
        let counts: OutcomeCounts = replayed.iter().map(|r| r.outcome).collect();

        let mut reason_counts: BTreeMap<String, usize> = BTreeMap::new();
        for r in &replayed {
            *reason_counts
                .entry(r.decision.reason_label().to_string())
                .or_default() += 1;
        }
        let escalated_voi: Vec<f64> = replayed
            .iter()
            .filter(|r| r.decision.escalate)
            .map(|r| r.decision.expected_voi)
            .collect();
        let agreeing = replayed.iter().filter(|r| r.matches_record).count();
        let decision_agreement = if replayed.is_empty() {
            0.0
        } else {
            agreeing as f64 / replayed.len() as f64
        };

        let report = ReplayReport {
            report: build_report(&counts, self.config.metric_epsilon),
            reason_counts,
            escalated_voi: summarize_voi(&escalated_voi),
            decision_agreement,
            realized_regret: replayed.iter().map(|r| r.regret).sum(),
            skipped,
        };
        info!(
            replayed = replayed.len(),
            skipped,
            escalation_rate = report.report.escalation_rate,
            decision_agreement,
            realized_regret = report.realized_regret,
            "replayed historical cases"
        );
        Ok(report)
    }

    /// [`recalibrate_bands`] with the configured minimum sample count.
    pub fn recalibrate(
        &self,
        config: &EscalationConfig,
        cases: &[ValidationCase],
    ) -> KingdomResult<BandRecalibration> {
        recalibrate_bands(config, cases, self.config.recalibration_min_samples)
    }
}

struct Replayed {
    decision: DecisionResult,
    outcome: EscalationOutcome,
    matches_record: bool,
    regret: f64,
}

fn decision_matches(case: &ValidationCase, outcome: EscalationOutcome) -> bool {
    let escalated = matches!(
        outcome,
        EscalationOutcome::CorrectEscalation | EscalationOutcome::UnnecessaryEscalation
    );
    escalated == case.escalated
}

/// Both estimates of case `index` must be well formed.
pub(crate) fn check_case(index: usize, case: &ValidationCase) -> KingdomResult<()> {
    for (label, estimate) in [("screening", &case.screening), ("high_fidelity", &case.high_fidelity)] {
        match estimate.validate() {
            Ok(()) => {}
            Err(KingdomError::MalformedEstimate { reason }) => {
                let id = case
                    .case_id
                    .clone()
                    .unwrap_or_else(|| format!("#{index}"));
                return Err(KingdomError::MalformedEstimate {
                    reason: format!("case {id} {label}: {reason}"),
                });
            }
            Err(other) => return Err(other),
        }
    }
    Ok(())
}

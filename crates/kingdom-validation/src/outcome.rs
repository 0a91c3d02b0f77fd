//! Classification of one historical decision.

use kingdom_core::models::{EscalationOutcome, ValidationCase};
use serde::{Deserialize, Serialize};

use crate::agreement::agreement;

/// Outcome of `case`: was escalation needed (screening disagreed) and did it happen?
pub fn classify(case: &ValidationCase) -> EscalationOutcome {
    classify_decision(case, case.escalated)
}

/// Outcome had `escalated` been the decision taken for `case`.
pub fn classify_decision(case: &ValidationCase, escalated: bool) -> EscalationOutcome {
    let needed = !agreement(&case.screening, &case.high_fidelity);
    match (escalated, needed) {
        (true, true) => EscalationOutcome::CorrectEscalation,
        (true, false) => EscalationOutcome::UnnecessaryEscalation,
        (false, true) => EscalationOutcome::MissedEscalation,
        (false, false) => EscalationOutcome::SafeNonEscalation,
    }
}

/// Tally of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub correct: usize,
    pub unnecessary: usize,
    pub missed: usize,
    pub safe: usize,
}

impl OutcomeCounts {
    pub fn add(&mut self, outcome: EscalationOutcome) {
        match outcome {
            EscalationOutcome::CorrectEscalation => self.correct += 1,
            EscalationOutcome::UnnecessaryEscalation => self.unnecessary += 1,
            EscalationOutcome::MissedEscalation => self.missed += 1,
            EscalationOutcome::SafeNonEscalation => self.safe += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.correct + self.unnecessary + self.missed + self.safe
    }

    pub fn escalated(&self) -> usize {
        self.correct + self.unnecessary
    }
}

impl FromIterator<EscalationOutcome> for OutcomeCounts {
    fn from_iter<I: IntoIterator<Item = EscalationOutcome>>(iter: I) -> Self {
        let mut counts = Self::default();
        for outcome in iter {
            counts.add(outcome);
        }
        counts
    }
}

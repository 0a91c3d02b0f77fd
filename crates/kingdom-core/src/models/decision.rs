use std::fmt;

use serde::{Deserialize, Serialize};

/// Governance override that forces escalation on its own.
///
/// Variants are declared in priority order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// High consequence severity combined with high model uncertainty.
    Stakes,
    /// The query sits close to a policy decision threshold.
    Boundary,
    /// The query looks out of distribution.
    Novelty,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 3] = [TriggerKind::Stakes, TriggerKind::Boundary, TriggerKind::Novelty];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Stakes => "stakes",
            TriggerKind::Boundary => "boundary",
            TriggerKind::Novelty => "novelty",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    /// At least one governance trigger fired.
    GovernanceTrigger,
    /// No trigger fired, but escalating lowers expected regret.
    PositiveValue,
    /// Screening estimate accepted.
    ScreeningSufficient,
}

impl DecisionBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionBasis::GovernanceTrigger => "governance_trigger",
            DecisionBasis::PositiveValue => "positive_voi",
            DecisionBasis::ScreeningSufficient => "screening_sufficient",
        }
    }
}

/// Output of one escalation decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// `loss_screen − loss_escalate`, in regret units.
    pub expected_voi: f64,
    pub escalate: bool,
    /// Highest-priority trigger that fired, if any.
    pub trigger: Option<TriggerKind>,
    /// Every trigger that fired, in priority order.
    pub fired_triggers: Vec<TriggerKind>,
    pub basis: DecisionBasis,
    /// Name of the probability band that matched.
    pub band: String,
    pub p_wrong_screen: f64,
    pub p_wrong_escalated: f64,
    pub loss_screen: f64,
    pub loss_escalate: f64,
}

impl DecisionResult {
    /// Label used to bucket decisions in metrics: the trigger name,
    /// `positive_voi` or `screening_sufficient`.
    pub fn reason_label(&self) -> &'static str {
        match self.trigger {
            Some(trigger) => trigger.as_str(),
            None => self.basis.as_str(),
        }
    }
}

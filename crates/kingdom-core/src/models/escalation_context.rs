use serde::{Deserialize, Serialize};

use crate::config::{defaults, ensure_non_negative, ensure_unit_interval};
use crate::errors::KingdomResult;

/// Per-query stakes, novelty, cost and loss parameters.
///
/// Immutable once constructed: fields are private and every constructor
/// (including deserialization) validates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ContextFields", into = "ContextFields")]
pub struct EscalationContext {
    consequence_severity: f64,
    model_uncertainty: f64,
    decision_sensitivity: f64,
    ood_risk: f64,
    escalation_cost: f64,
    screening_cost: f64,
    cost_false_negative: f64,
    cost_false_positive: f64,
}

/// Serialized form of [`EscalationContext`]. Costs fall back to defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContextFields {
    pub consequence_severity: f64,
    pub model_uncertainty: f64,
    pub decision_sensitivity: f64,
    pub ood_risk: f64,
    #[serde(default = "default_escalation_cost")]
    pub escalation_cost: f64,
    #[serde(default = "default_screening_cost")]
    pub screening_cost: f64,
    #[serde(default = "default_cost_false_negative")]
    pub cost_false_negative: f64,
    #[serde(default = "default_cost_false_positive")]
    pub cost_false_positive: f64,
}

fn default_escalation_cost() -> f64 {
    defaults::DEFAULT_ESCALATION_COST
}
fn default_screening_cost() -> f64 {
    defaults::DEFAULT_SCREENING_COST
}
fn default_cost_false_negative() -> f64 {
    defaults::DEFAULT_COST_FALSE_NEGATIVE
}
fn default_cost_false_positive() -> f64 {
    defaults::DEFAULT_COST_FALSE_POSITIVE
}

impl EscalationContext {
    /// Context with the default cost and loss parameters.
    pub fn new(
        consequence_severity: f64,
        model_uncertainty: f64,
        decision_sensitivity: f64,
        ood_risk: f64,
    ) -> KingdomResult<Self> {
        Self::try_from(ContextFields {
            consequence_severity,
            model_uncertainty,
            decision_sensitivity,
            ood_risk,
            escalation_cost: defaults::DEFAULT_ESCALATION_COST,
            screening_cost: defaults::DEFAULT_SCREENING_COST,
            cost_false_negative: defaults::DEFAULT_COST_FALSE_NEGATIVE,
            cost_false_positive: defaults::DEFAULT_COST_FALSE_POSITIVE,
        })
    }

    /// Copy of this context with different costs. Validated like `new`.
    pub fn with_costs(
        &self,
        escalation_cost: f64,
        screening_cost: f64,
        cost_false_negative: f64,
        cost_false_positive: f64,
    ) -> KingdomResult<Self> {
        Self::try_from(ContextFields {
            escalation_cost,
            screening_cost,
            cost_false_negative,
            cost_false_positive,
            ..ContextFields::from(*self)
        })
    }

    pub fn consequence_severity(&self) -> f64 {
        self.consequence_severity
    }
    pub fn model_uncertainty(&self) -> f64 {
        self.model_uncertainty
    }
    /// Proximity to a policy threshold.
    pub fn decision_sensitivity(&self) -> f64 {
        self.decision_sensitivity
    }
    pub fn ood_risk(&self) -> f64 {
        self.ood_risk
    }
    pub fn escalation_cost(&self) -> f64 {
        self.escalation_cost
    }
    pub fn screening_cost(&self) -> f64 {
        self.screening_cost
    }
    pub fn cost_false_negative(&self) -> f64 {
        self.cost_false_negative
    }
    pub fn cost_false_positive(&self) -> f64 {
        self.cost_false_positive
    }
}

impl TryFrom<ContextFields> for EscalationContext {
    type Error = crate::errors::KingdomError;

    fn try_from(f: ContextFields) -> Result<Self, Self::Error> {
        ensure_unit_interval("consequence_severity", f.consequence_severity)?;
        ensure_unit_interval("model_uncertainty", f.model_uncertainty)?;
        ensure_unit_interval("decision_sensitivity", f.decision_sensitivity)?;
        ensure_unit_interval("ood_risk", f.ood_risk)?;
        ensure_non_negative("escalation_cost", f.escalation_cost)?;
        ensure_non_negative("screening_cost", f.screening_cost)?;
        ensure_non_negative("cost_false_negative", f.cost_false_negative)?;
        ensure_non_negative("cost_false_positive", f.cost_false_positive)?;
        Ok(Self {
            consequence_severity: f.consequence_severity,
            model_uncertainty: f.model_uncertainty,
            decision_sensitivity: f.decision_sensitivity,
            ood_risk: f.ood_risk,
            escalation_cost: f.escalation_cost,
            screening_cost: f.screening_cost,
            cost_false_negative: f.cost_false_negative,
            cost_false_positive: f.cost_false_positive,
        })
    }
}

impl From<EscalationContext> for ContextFields {
    fn from(c: EscalationContext) -> Self {
        Self {
            consequence_severity: c.consequence_severity,
            model_uncertainty: c.model_uncertainty,
            decision_sensitivity: c.decision_sensitivity,
            ood_risk: c.ood_risk,
            escalation_cost: c.escalation_cost,
            screening_cost: c.screening_cost,
            cost_false_negative: c.cost_false_negative,
            cost_false_positive: c.cost_false_positive,
        }
    }
}

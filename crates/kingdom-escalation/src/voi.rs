//! Expected-regret arithmetic for screen-vs-escalate.
//!
//! ```text
//! p_esc         = p_screen × reduction_factor
//! loss_screen   = p_screen × C_fn
//! loss_escalate = p_esc × C_fn + escalation_cost
//! voi           = loss_screen − loss_escalate
//! ```
//!
//! The screening cost is paid under both strategies, so it cancels out of
//! the difference.

use kingdom_core::models::EscalationContext;
use serde::{Deserialize, Serialize};

/// Every intermediate of one VoI computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiBreakdown {
    pub p_wrong_screen: f64,
    pub p_wrong_escalated: f64,
    pub loss_screen: f64,
    pub loss_escalate: f64,
    pub expected_voi: f64,
}

impl VoiBreakdown {
    pub fn compute(p_wrong_screen: f64, reduction_factor: f64, context: &EscalationContext) -> Self {
        let p_wrong_escalated = p_wrong_screen * reduction_factor;
        let loss_screen = p_wrong_screen * context.cost_false_negative();
        let loss_escalate =
            p_wrong_escalated * context.cost_false_negative() + context.escalation_cost();
        Self {
            p_wrong_screen,
            p_wrong_escalated,
            loss_screen,
            loss_escalate,
            expected_voi: loss_screen - loss_escalate,
        }
    }

    /// Escalating lowers expected regret.
    pub fn favours_escalation(&self) -> bool {
        self.expected_voi > 0.0
    }
}

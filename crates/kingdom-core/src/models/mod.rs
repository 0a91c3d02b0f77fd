mod coverage;
mod decision;
mod escalation_context;
mod interval_estimate;
mod scenario;
mod trajectory;
mod validation_case;

pub use coverage::CoverageDiagnostic;
pub use decision::{DecisionBasis, DecisionResult, TriggerKind};
pub use escalation_context::{ContextFields, EscalationContext};
pub use interval_estimate::IntervalEstimate;
pub use scenario::{ScenarioQuery, Tier};
pub use trajectory::BaselineTrajectory;
pub use validation_case::{
    EscalationOutcome, ReplayReport, ValidationCase, ValidationReport, VoiSummary,
};

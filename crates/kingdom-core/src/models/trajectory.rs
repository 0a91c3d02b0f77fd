use serde::{Deserialize, Serialize};

/// Baseline trajectory for a scenario over a time horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineTrajectory {
    pub scenario_id: String,
    /// Horizon in years.
    pub time_horizon: u32,
    pub values: Vec<f64>,
}

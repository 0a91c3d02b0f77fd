use std::fmt;

use serde::{Deserialize, Serialize};

/// A query handed to an estimator tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioQuery {
    pub scenario_id: String,
    /// Horizon in years.
    pub time_horizon: u32,
    /// Model input features.
    pub features: Vec<f64>,
}

/// Which estimator tier produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Screening,
    HighFidelity,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Screening => f.write_str("screening"),
            Tier::HighFidelity => f.write_str("high_fidelity"),
        }
    }
}

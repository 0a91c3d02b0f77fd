// Single source of truth for all default values.

// --- Escalation: probability bands ---
pub const DEFAULT_SIGN_AMBIGUOUS_PROBABILITY: f64 = 0.45;
pub const DEFAULT_WIDE_RATIO: f64 = 2.0;
pub const DEFAULT_WIDE_PROBABILITY: f64 = 0.35;
pub const DEFAULT_MODERATE_RATIO: f64 = 1.25;
pub const DEFAULT_MODERATE_PROBABILITY: f64 = 0.15;
pub const DEFAULT_TIGHT_PROBABILITY: f64 = 0.05;

// --- Escalation: arithmetic ---
pub const DEFAULT_UNCERTAINTY_REDUCTION_FACTOR: f64 = 0.3;
pub const DEFAULT_RATIO_EPSILON: f64 = 1e-9;

// --- Escalation: governance triggers ---
pub const DEFAULT_STAKES_SEVERITY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_STAKES_UNCERTAINTY_THRESHOLD: f64 = 0.4;
pub const DEFAULT_BOUNDARY_SENSITIVITY_THRESHOLD: f64 = 0.6;
pub const DEFAULT_NOVELTY_OOD_THRESHOLD: f64 = 0.5;

// --- Escalation: per-query costs (hours / regret units) ---
pub const DEFAULT_ESCALATION_COST: f64 = 10.0;
pub const DEFAULT_SCREENING_COST: f64 = 0.25;
pub const DEFAULT_COST_FALSE_NEGATIVE: f64 = 45.0;
pub const DEFAULT_COST_FALSE_POSITIVE: f64 = 10.0;

// --- Calibration ---
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.90;
pub const DEFAULT_COVERAGE_TOLERANCE: f64 = 0.05;
pub const DEFAULT_SWEEP_LEVELS: [f64; 5] = [0.70, 0.80, 0.85, 0.90, 0.95];
pub const DEFAULT_RIDGE_LAMBDA: f64 = 1e-8;

// --- Validation ---
pub const DEFAULT_METRIC_EPSILON: f64 = 1e-9;
pub const DEFAULT_RECALIBRATION_MIN_SAMPLES: usize = 5;
pub const DEFAULT_MIN_PRECISION: f64 = 0.5;
pub const DEFAULT_MIN_RECALL: f64 = 0.8;
pub const DEFAULT_MAX_ESCALATION_RATE: f64 = 0.6;

// --- Cache ---
pub const DEFAULT_CACHE_MAX_CAPACITY: Option<u64> = None;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
pub const DEFAULT_TRACING_ENABLED: bool = true;

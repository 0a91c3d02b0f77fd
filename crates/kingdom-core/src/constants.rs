/// Smallest calibration set for which a conformal quantile is meaningful.
pub const MIN_CALIBRATION_SET_SIZE: usize = 2;

/// Lower bound of every normalized context score.
pub const SCORE_MIN: f64 = 0.0;

/// Upper bound of every normalized context score.
pub const SCORE_MAX: f64 = 1.0;

/// Segment label for validation cases that carry none.
pub const UNLABELED_SEGMENT: &str = "unlabeled";

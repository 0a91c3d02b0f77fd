/// Conformal calibration errors.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("calibrator has not been fitted")]
    NotFitted,

    #[error("{what}: expected {expected} values, got {actual}")]
    LengthMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("{what} is empty")]
    EmptyInput { what: String },

    #[error("feature width mismatch: expected {expected}, got {actual}")]
    FeatureWidthMismatch { expected: usize, actual: usize },

    #[error("normal equations are singular at column {column}")]
    SingularSystem { column: usize },

    #[error("calibration version {version} has not passed its coverage diagnostic")]
    Untrusted { version: u64 },

    #[error("non-finite value in {what}")]
    NonFinite { what: String },
}

mod calibration_error;
mod kingdom_error;

pub use calibration_error::CalibrationError;
pub use kingdom_error::{KingdomError, KingdomResult};

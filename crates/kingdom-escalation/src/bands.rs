//! Ordered probability-band lookup for `p_wrong_screen`.

use kingdom_core::config::{BandCondition, ProbabilityBand};
use kingdom_core::errors::{KingdomError, KingdomResult};

use crate::signals::ScreeningSignals;

/// Whether `condition` holds for `signals`.
pub fn condition_matches(condition: &BandCondition, signals: &ScreeningSignals) -> bool {
    match condition {
        BandCondition::SignAmbiguous => signals.sign_ambiguous,
        BandCondition::RatioAbove { ratio } => signals.uncertainty_ratio > *ratio,
        BandCondition::Always => true,
    }
}

/// Index of the first band whose condition holds.
///
/// A validated table ends with `Always`, so this only fails on an
/// unvalidated one.
pub fn select_band_index(bands: &[ProbabilityBand], signals: &ScreeningSignals) -> KingdomResult<usize> {
    bands
        .iter()
        .position(|band| condition_matches(&band.condition, signals))
        .ok_or_else(|| KingdomError::InvalidConfiguration {
            reason: "no probability band matched; the table must end with `always`".to_string(),
        })
}

/// The first band whose condition holds.
pub fn select_band<'a>(
    bands: &'a [ProbabilityBand],
    signals: &ScreeningSignals,
) -> KingdomResult<&'a ProbabilityBand> {
    Ok(&bands[select_band_index(bands, signals)?])
}

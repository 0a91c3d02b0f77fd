//! Re-estimates the `p_wrong_screen` band table from validated history.
//!
//! Each case is assigned the band the engine would have used for its
//! screening estimate. A band with at least `min_samples` cases takes the
//! Laplace-smoothed disagreement rate `(d + 1) / (n + 2)`; sparser bands keep
//! their prior. Pool-adjacent-violators then restores the non-increasing
//! order, weighting each band by `n + 2`, so the new table always validates.

use chrono::{DateTime, Utc};
use kingdom_core::config::EscalationConfig;
use kingdom_core::errors::KingdomResult;
use kingdom_core::models::ValidationCase;
use kingdom_escalation::bands::select_band_index;
use kingdom_escalation::ScreeningSignals;
use kingdom_observability::tracing_setup::events;
use serde::{Deserialize, Serialize};

use crate::agreement::agreement;
use crate::validator::check_case;

/// What happened to one band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandAdjustment {
    pub band: String,
    /// Cases assigned to this band.
    pub n_cases: usize,
    /// Of those, cases where screening disagreed with ground truth.
    pub disagreements: usize,
    pub previous: f64,
    /// Smoothed rate, when the band had enough cases.
    pub empirical: Option<f64>,
    /// Final probability after the monotone projection.
    pub updated: f64,
}

/// A recalibrated escalation configuration and how it was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandRecalibration {
    pub config: EscalationConfig,
    pub adjustments: Vec<BandAdjustment>,
    pub recalibrated_at: DateTime<Utc>,
}

/// Recalibrate the band probabilities of `config` against `cases`.
///
/// Everything but the probabilities is carried over unchanged.
pub fn recalibrate_bands(
    config: &EscalationConfig,
    cases: &[ValidationCase],
    min_samples: usize,
) -> KingdomResult<BandRecalibration> {
    config.validate()?;

    let mut n = vec![0usize; config.bands.len()];
    let mut disagreements = vec![0usize; config.bands.len()];
    for (i, case) in cases.iter().enumerate() {
        check_case(i, case)?;
        let signals = ScreeningSignals::from_estimate(&case.screening, config.ratio_epsilon);
        let band = select_band_index(&config.bands, &signals)?;
        n[band] += 1;
        if !agreement(&case.screening, &case.high_fidelity) {
            disagreements[band] += 1;
        }
    }

    let empirical: Vec<Option<f64>> = n
        .iter()
        .zip(&disagreements)
        .map(|(&n, &d)| (n >= min_samples).then(|| (d as f64 + 1.0) / (n as f64 + 2.0)))
        .collect();
    let raw: Vec<f64> = config
        .bands
        .iter()
        .zip(&empirical)
        .map(|(band, e)| e.unwrap_or(band.probability))
        .collect();
    let weights: Vec<f64> = n.iter().map(|&n| n as f64 + 2.0).collect();
    let projected = pool_adjacent_violators(&raw, &weights);

    let mut updated = config.clone();
    let mut adjustments = Vec::with_capacity(config.bands.len());
    for (i, band) in updated.bands.iter_mut().enumerate() {
        let previous = band.probability;
        band.probability = projected[i];
        if previous != band.probability {
            events::band_recalibrated(&band.name, previous, band.probability, n[i]);
        }
        adjustments.push(BandAdjustment {
            band: band.name.clone(),
            n_cases: n[i],
            disagreements: disagreements[i],
            previous,
            empirical: empirical[i],
            updated: band.probability,
        });
    }
    updated.validate()?;

    Ok(BandRecalibration {
        config: updated,
        adjustments,
        recalibrated_at: Utc::now(),
    })
}

/// Weighted least-squares projection of `values` onto non-increasing sequences.
fn pool_adjacent_violators(values: &[f64], weights: &[f64]) -> Vec<f64> {
    // (mean, weight, members)
    let mut blocks: Vec<(f64, f64, usize)> = Vec::with_capacity(values.len());
    for (&value, &weight) in values.iter().zip(weights) {
        blocks.push((value, weight, 1));
        while blocks.len() > 1 {
            let (v2, w2, c2) = blocks[blocks.len() - 1];
            let (v1, w1, c1) = blocks[blocks.len() - 2];
            if v1 >= v2 {
                break;
            }
            let w = w1 + w2;
            blocks.truncate(blocks.len() - 2);
            blocks.push(((v1 * w1 + v2 * w2) / w, w, c1 + c2));
        }
    }
    blocks
        .into_iter()
        .flat_map(|(value, _, members)| std::iter::repeat(value).take(members))
        .collect()
}

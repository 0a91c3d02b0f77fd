//! Finite-sample conformal quantile.

/// Slack subtracted before `ceil` so `(n+1)·c` landing a hair above an
/// integer through float rounding does not skip an order statistic.
const RANK_SLACK: f64 = 1e-9;

/// The `⌈(n+1)·confidence_level⌉`-th smallest residual.
///
/// `sorted_residuals` must be sorted ascending. The rank is clamped to
/// `[1, n]`; an empty slice yields `+∞` (no finite interval is honest).
pub fn conformal_quantile(sorted_residuals: &[f64], confidence_level: f64) -> f64 {
    let n = sorted_residuals.len();
    if n == 0 {
        return f64::INFINITY;
    }
    let rank = ((n + 1) as f64 * confidence_level - RANK_SLACK).ceil();
    let rank = if rank.is_finite() && rank > 0.0 { rank as usize } else { 0 };
    let idx = rank.saturating_sub(1).min(n - 1);
    sorted_residuals[idx]
}

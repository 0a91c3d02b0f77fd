//! Deterministic synthetic regression data.

/// Uniform draw in `[0, 1)` for `(seed, index)`.
pub fn unit_uniform(seed: u64, index: u64) -> f64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed.to_le_bytes());
    hasher.update(&index.to_le_bytes());
    let hash = hasher.finalize();
    let mut word = [0u8; 8];
    word.copy_from_slice(&hash.as_bytes()[..8]);
    // Top 53 bits → an exactly representable f64 in [0, 1).
    (u64::from_le_bytes(word) >> 11) as f64 / (1u64 << 53) as f64
}

/// Features and targets of a regression dataset.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl SyntheticDataset {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// `y = slope·x + intercept + ε` with `x ~ U[0, 10)` and `ε ~ U[−noise, noise)`.
///
/// Datasets drawn with different seeds are i.i.d. with each other, hence
/// exchangeable: the setting in which conformal coverage is guaranteed.
pub fn linear_dataset(n: usize, seed: u64, slope: f64, intercept: f64, noise: f64) -> SyntheticDataset {
    let mut features = Vec::with_capacity(n);
    let mut targets = Vec::with_capacity(n);
    for i in 0..n as u64 {
        let x = unit_uniform(seed, 2 * i) * 10.0;
        let eps = (unit_uniform(seed, 2 * i + 1) * 2.0 - 1.0) * noise;
        features.push(vec![x]);
        targets.push(slope * x + intercept + eps);
    }
    SyntheticDataset { features, targets }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_deterministic_and_in_range() {
        for i in 0..1000 {
            let u = unit_uniform(7, i);
            assert!((0.0..1.0).contains(&u));
            assert_eq!(u, unit_uniform(7, i));
        }
        assert_ne!(unit_uniform(1, 0), unit_uniform(2, 0));
    }

    #[test]
    fn uniform_mean_is_near_half() {
        let mean: f64 = (0..10_000).map(|i| unit_uniform(42, i)).sum::<f64>() / 10_000.0;
        assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn linear_dataset_has_requested_shape() {
        let data = linear_dataset(50, 3, 2.0, 1.0, 0.5);
        assert_eq!(data.len(), 50);
        assert!(data
            .features
            .iter()
            .zip(&data.targets)
            .all(|(x, y)| (y - (2.0 * x[0] + 1.0)).abs() <= 0.5));
    }
}

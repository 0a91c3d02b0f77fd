use std::sync::Arc;
use std::thread;

use kingdom_calibration::{CalibratedEstimator, ConformalCalibrator, LinearRegressor, MeanRegressor};
use kingdom_core::config::{CalibrationConfig, KingdomConfig};
use kingdom_core::errors::{CalibrationError, KingdomError};
use kingdom_core::models::{ScenarioQuery, Tier};
use kingdom_core::traits::IEstimator;
use test_fixtures::load_fixture_text;
use test_fixtures::synthetic::{linear_dataset, SyntheticDataset};

// ── Helpers ───────────────────────────────────────────────────────────────

struct Split {
    train: SyntheticDataset,
    calib: SyntheticDataset,
    test: SyntheticDataset,
}

fn split(noise: f64) -> Split {
    Split {
        train: linear_dataset(500, 1, 2.0, 1.0, noise),
        calib: linear_dataset(1_000, 2, 2.0, 1.0, noise),
        test: linear_dataset(5_000, 3, 2.0, 1.0, noise),
    }
}

fn fitted_linear(level: f64) -> (ConformalCalibrator<LinearRegressor>, Split) {
    let data = split(1.0);
    let calibrator = ConformalCalibrator::new(LinearRegressor::default());
    calibrator
        .fit(
            &data.train.features,
            &data.train.targets,
            &data.calib.features,
            &data.calib.targets,
            level,
        )
        .unwrap();
    (calibrator, data)
}

// ── Coverage guarantee ────────────────────────────────────────────────────

#[test]
fn coverage_within_tolerance_of_confidence_level() {
    for level in [0.8, 0.9, 0.95] {
        let (calibrator, data) = fitted_linear(level);
        let diag = calibrator
            .coverage_diagnostic(&data.test.features, &data.test.targets)
            .unwrap();
        assert!(
            (diag.empirical_coverage - level).abs() < 0.05,
            "level {level}: empirical coverage {}",
            diag.empirical_coverage
        );
        assert!(diag.coverage_achieved);
        assert_eq!(diag.target_coverage, level);
        assert_eq!(diag.n_test, 5_000);
    }
}

#[test]
fn poor_base_model_widens_intervals_but_keeps_coverage() {
    let data = split(1.0);
    let linear = ConformalCalibrator::new(LinearRegressor::default());
    let constant = ConformalCalibrator::new(MeanRegressor::new());
    for calibrator_fit in [
        linear.fit(
            &data.train.features,
            &data.train.targets,
            &data.calib.features,
            &data.calib.targets,
            0.9,
        ),
        constant.fit(
            &data.train.features,
            &data.train.targets,
            &data.calib.features,
            &data.calib.targets,
            0.9,
        ),
    ] {
        calibrator_fit.unwrap();
    }

    let good = linear
        .coverage_diagnostic(&data.test.features, &data.test.targets)
        .unwrap();
    let poor = constant
        .coverage_diagnostic(&data.test.features, &data.test.targets)
        .unwrap();

    assert!(poor.mean_interval_width > 5.0 * good.mean_interval_width);
    assert!((poor.empirical_coverage - 0.9).abs() < 0.05, "{}", poor.empirical_coverage);
}

#[test]
fn predict_returns_symmetric_intervals_around_point() {
    let (calibrator, _) = fitted_linear(0.9);
    let q = calibrator.q_hat().unwrap();
    let intervals = calibrator.predict(&[vec![1.0], vec![5.0]]).unwrap();
    assert_eq!(intervals.len(), 2);
    for est in &intervals {
        assert!((est.upper - est.point - q).abs() < 1e-12);
        assert!((est.point - est.lower - q).abs() < 1e-12);
    }
    // Roughly on the line y = 2x + 1.
    assert!((intervals[1].point - 11.0).abs() < 0.2);
}

// ── Quantile uses the calibration set only ────────────────────────────────

#[test]
fn q_hat_is_order_statistic_of_calibration_residuals() {
    let calibrator = ConformalCalibrator::new(MeanRegressor::new());
    // Training mean is 0; training targets are far from anything in calibration.
    let train_x = vec![vec![0.0], vec![0.0]];
    let train_y = vec![-1_000.0, 1_000.0];
    let calib_x: Vec<Vec<f64>> = (1..=10).map(|_| vec![0.0]).collect();
    let calib_y: Vec<f64> = (1..=10).map(f64::from).collect();

    calibrator.fit(&train_x, &train_y, &calib_x, &calib_y, 0.9).unwrap();
    // n = 10, rank ⌈11 · 0.9⌉ = 10 → largest residual.
    assert_eq!(calibrator.q_hat().unwrap(), 10.0);

    calibrator.fit(&train_x, &train_y, &calib_x, &calib_y, 0.5).unwrap();
    // rank ⌈5.5⌉ = 6.
    assert_eq!(calibrator.q_hat().unwrap(), 6.0);

    let state = calibrator.state().unwrap();
    assert_eq!(state.n_calibration(), 10);
    assert_eq!(state.n_training, 2);
    assert!(state.residuals.windows(2).all(|w| w[0] <= w[1]));
}

// ── Failure modes ─────────────────────────────────────────────────────────

#[test]
fn calibration_set_smaller_than_two_is_invalid() {
    let calibrator = ConformalCalibrator::new(LinearRegressor::default());
    let train_x = vec![vec![0.0], vec![1.0], vec![2.0]];
    let train_y = vec![0.0, 1.0, 2.0];
    let err = calibrator
        .fit(&train_x, &train_y, &[vec![1.0]], &[1.0], 0.9)
        .unwrap_err();
    assert!(matches!(err, KingdomError::InvalidConfiguration { .. }));
    assert!(!calibrator.is_fitted());
}

#[test]
fn confidence_level_outside_open_interval_is_invalid() {
    let data = split(1.0);
    let calibrator = ConformalCalibrator::new(LinearRegressor::default());
    for level in [0.0, 1.0, 1.5, -0.2] {
        let err = calibrator
            .fit(
                &data.train.features,
                &data.train.targets,
                &data.calib.features,
                &data.calib.targets,
                level,
            )
            .unwrap_err();
        assert!(matches!(err, KingdomError::InvalidConfiguration { .. }), "level {level}");
    }
}

#[test]
fn mismatched_lengths_are_rejected() {
    let calibrator = ConformalCalibrator::new(LinearRegressor::default());
    let x = vec![vec![0.0], vec![1.0], vec![2.0]];
    let err = calibrator
        .fit(&x, &[0.0, 1.0, 2.0], &x, &[0.0, 1.0], 0.9)
        .unwrap_err();
    assert!(matches!(
        err,
        KingdomError::Calibration(CalibrationError::LengthMismatch { .. })
    ));
}

#[test]
fn predict_before_fit_is_not_fitted() {
    let calibrator = ConformalCalibrator::new(LinearRegressor::default());
    let err = calibrator.predict(&[vec![1.0]]).unwrap_err();
    assert!(matches!(
        err,
        KingdomError::Calibration(CalibrationError::NotFitted)
    ));
}

#[test]
fn failed_refit_keeps_previous_state() {
    let (calibrator, data) = fitted_linear(0.9);
    let before = calibrator.state().unwrap();
    assert!(calibrator
        .fit(
            &data.train.features,
            &data.train.targets,
            &data.calib.features[..1],
            &data.calib.targets[..1],
            0.9,
        )
        .is_err());
    let after = calibrator.state().unwrap();
    assert_eq!(before.version, after.version);
    assert_eq!(before.q_hat, after.q_hat);
}

// ── Acceptance gate ───────────────────────────────────────────────────────

#[test]
fn trust_requires_passing_diagnostic_and_resets_on_refit() {
    let (calibrator, data) = fitted_linear(0.9);
    assert!(!calibrator.is_trusted(), "fitting alone must not grant trust");

    calibrator
        .coverage_diagnostic(&data.test.features, &data.test.targets)
        .unwrap();
    assert!(calibrator.is_trusted());

    calibrator
        .fit(
            &data.train.features,
            &data.train.targets,
            &data.calib.features,
            &data.calib.targets,
            0.8,
        )
        .unwrap();
    assert!(!calibrator.is_trusted());
}

#[test]
fn failing_diagnostic_does_not_grant_trust() {
    let (calibrator, _) = fitted_linear(0.9);
    // Test data from a shifted distribution: exchangeability broken.
    let shifted = linear_dataset(500, 9, 2.0, 50.0, 1.0);
    let diag = calibrator
        .coverage_diagnostic(&shifted.features, &shifted.targets)
        .unwrap();
    assert!(!diag.coverage_achieved);
    assert!(!calibrator.is_trusted());
}

#[test]
fn tighter_tolerance_is_honoured() {
    let data = split(1.0);
    let config = CalibrationConfig {
        coverage_tolerance: 1e-9,
        ..Default::default()
    };
    let calibrator = ConformalCalibrator::with_config(LinearRegressor::default(), config).unwrap();
    calibrator
        .fit(
            &data.train.features,
            &data.train.targets,
            &data.calib.features,
            &data.calib.targets,
            0.9,
        )
        .unwrap();
    let diag = calibrator
        .coverage_diagnostic(&data.test.features, &data.test.targets)
        .unwrap();
    assert!(!diag.coverage_achieved);
}

#[test]
fn estimator_tier_serves_only_diagnosed_fits() {
    let (calibrator, data) = fitted_linear(0.9);
    let calibrator = Arc::new(calibrator);
    let estimator = CalibratedEstimator::new(Arc::clone(&calibrator), Tier::Screening);
    let query = ScenarioQuery {
        scenario_id: "dike-ring-7".to_string(),
        time_horizon: 50,
        features: vec![2.0],
    };

    let err = estimator.estimate(&query).unwrap_err();
    assert!(matches!(
        err,
        KingdomError::Calibration(CalibrationError::Untrusted { version: 1 })
    ));

    calibrator
        .coverage_diagnostic(&data.test.features, &data.test.targets)
        .unwrap();
    let est = estimator.estimate(&query).unwrap();
    assert!(est.lower < est.point && est.point < est.upper);

    // A re-fit must be diagnosed again before it is served.
    calibrator
        .fit(
            &data.train.features,
            &data.train.targets,
            &data.calib.features,
            &data.calib.targets,
            0.9,
        )
        .unwrap();
    assert!(matches!(
        estimator.estimate(&query).unwrap_err(),
        KingdomError::Calibration(CalibrationError::Untrusted { version: 2 })
    ));
}

// ── Configuration ─────────────────────────────────────────────────────────

#[test]
fn configured_level_and_ridge_come_from_the_deployment_profile() {
    let config = KingdomConfig::from_toml(&load_fixture_text("golden/config/kingdom.toml")).unwrap();
    let calibration = config.calibration;
    assert_eq!(calibration.confidence_level, 0.95);

    let data = split(1.0);
    let calibrator = ConformalCalibrator::with_config(
        LinearRegressor::from_config(&calibration),
        calibration.clone(),
    )
    .unwrap();
    calibrator
        .fit_at_configured_level(
            &data.train.features,
            &data.train.targets,
            &data.calib.features,
            &data.calib.targets,
        )
        .unwrap();
    let state = calibrator.state().unwrap();
    assert_eq!(state.confidence_level, 0.95);
    assert_eq!(state.regressor.ridge_lambda(), calibration.ridge_lambda);

    let (explicit, _) = fitted_linear(0.95);
    assert!((calibrator.q_hat().unwrap() - explicit.q_hat().unwrap()).abs() < 1e-6);
}

// ── Coverage sweep ────────────────────────────────────────────────────────

#[test]
fn coverage_sweep_tracks_declared_levels() {
    let (calibrator, data) = fitted_linear(0.9);
    let curve = calibrator
        .coverage_sweep(&data.test.features, &data.test.targets, &[])
        .unwrap();
    assert_eq!(curve.len(), 5);
    for point in &curve {
        assert!(
            (point.empirical_coverage - point.target_coverage).abs() < 0.05,
            "declared {} empirical {}",
            point.target_coverage,
            point.empirical_coverage
        );
    }
    assert!(curve
        .windows(2)
        .all(|w| w[0].mean_interval_width <= w[1].mean_interval_width));
}

#[test]
fn coverage_sweep_rejects_invalid_level() {
    let (calibrator, data) = fitted_linear(0.9);
    assert!(calibrator
        .coverage_sweep(&data.test.features, &data.test.targets, &[0.9, 1.0])
        .is_err());
}

// ── Concurrency ───────────────────────────────────────────────────────────

#[test]
fn refit_is_observed_atomically_by_concurrent_predictors() {
    let narrow = linear_dataset(400, 11, 2.0, 1.0, 0.1);
    let wide = linear_dataset(400, 12, 2.0, 1.0, 5.0);
    let calibrator = Arc::new(ConformalCalibrator::new(LinearRegressor::default()));
    calibrator
        .fit(&narrow.features, &narrow.targets, &narrow.features, &narrow.targets, 0.9)
        .unwrap();

    let inputs: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64 / 8.0]).collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let calibrator = Arc::clone(&calibrator);
            let inputs = inputs.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let intervals = calibrator.predict(&inputs).unwrap();
                    let width = intervals[0].width();
                    assert!(
                        intervals.iter().all(|e| (e.width() - width).abs() < 1e-9),
                        "one predict call mixed two calibration states"
                    );
                }
            })
        })
        .collect();

    for i in 0..50 {
        let data = if i % 2 == 0 { &wide } else { &narrow };
        calibrator
            .fit(&data.features, &data.targets, &data.features, &data.targets, 0.9)
            .unwrap();
    }
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(calibrator.state().unwrap().version, 51);
}

#[test]
fn concurrent_refits_install_increasing_versions() {
    let data = linear_dataset(200, 13, 2.0, 1.0, 1.0);
    let calibrator = Arc::new(ConformalCalibrator::new(LinearRegressor::default()));
    calibrator
        .fit(&data.features, &data.targets, &data.features, &data.targets, 0.9)
        .unwrap();

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let calibrator = Arc::clone(&calibrator);
            let data = data.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    calibrator
                        .fit(&data.features, &data.targets, &data.features, &data.targets, 0.9)
                        .unwrap();
                }
            })
        })
        .collect();

    let mut last = 0;
    while writers.iter().any(|w| !w.is_finished()) {
        let version = calibrator.state().unwrap().version;
        assert!(version >= last, "version went back from {last} to {version}");
        last = version;
    }
    for writer in writers {
        writer.join().unwrap();
    }
    assert_eq!(calibrator.state().unwrap().version, 101);
}

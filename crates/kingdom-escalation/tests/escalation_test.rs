//! Tests for the escalation engine: decision scenarios, trigger dominance,
//! refusal of malformed input, configurable bands, and properties.

use std::sync::Arc;
use std::thread;

use kingdom_core::config::{BandCondition, EscalationConfig, ProbabilityBand, TriggerThresholds};
use kingdom_core::errors::KingdomError;
use kingdom_core::models::{DecisionBasis, EscalationContext, IntervalEstimate, TriggerKind};
use kingdom_core::traits::IEscalationPolicy;
use kingdom_escalation::EscalationEngine;
use proptest::prelude::*;

fn ctx(sev: f64, unc: f64, sens: f64, ood: f64) -> EscalationContext {
    EscalationContext::new(sev, unc, sens, ood).unwrap()
}

fn est(point: f64, lower: f64, upper: f64) -> IntervalEstimate {
    IntervalEstimate::new(point, lower, upper).unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn high_stakes_near_threshold_escalates() {
    let engine = EscalationEngine::default();
    let decision = engine
        .decide(&ctx(0.85, 0.55, 0.65, 0.20), &est(0.35, 0.15, 0.60))
        .unwrap();

    assert!(decision.escalate);
    assert_eq!(decision.basis, DecisionBasis::GovernanceTrigger);
    assert!(decision.fired_triggers.contains(&TriggerKind::Boundary));
    assert!(decision.fired_triggers.contains(&TriggerKind::Stakes));
    assert_eq!(decision.trigger, Some(TriggerKind::Stakes));
    assert!(!decision.fired_triggers.contains(&TriggerKind::Novelty));
    // Ratio 0.45 / 0.35 ≈ 1.29 lands in the moderate band.
    assert_eq!(decision.band, "moderate_ratio");
    assert!((decision.p_wrong_screen - 0.15).abs() < 1e-12);
}

#[test]
fn low_stakes_tight_estimate_is_screened() {
    let engine = EscalationEngine::default();
    let decision = engine
        .decide(&ctx(0.2, 0.1, 0.1, 0.05), &est(0.11, 0.06, 0.17))
        .unwrap();

    assert!(!decision.escalate);
    assert_eq!(decision.basis, DecisionBasis::ScreeningSufficient);
    assert!(decision.trigger.is_none());
    assert!(decision.fired_triggers.is_empty());
    assert!(decision.expected_voi < 0.0);
    assert_eq!(decision.reason_label(), "screening_sufficient");
}

#[test]
fn ambiguous_sign_escalates_on_value_alone() {
    let engine = EscalationEngine::default();
    let decision = engine
        .decide(&ctx(0.2, 0.1, 0.1, 0.05), &est(0.05, -0.2, 0.3))
        .unwrap();

    assert!(decision.escalate);
    assert_eq!(decision.basis, DecisionBasis::PositiveValue);
    assert_eq!(decision.band, "sign_ambiguous");
    assert!(decision.expected_voi > 0.0);
    assert_eq!(decision.reason_label(), "positive_voi");
}

#[test]
fn trigger_dominates_negative_value() {
    let engine = EscalationEngine::default();
    let decision = engine
        .decide(&ctx(0.1, 0.1, 0.9, 0.0), &est(0.11, 0.06, 0.17))
        .unwrap();

    assert!(decision.expected_voi < 0.0);
    assert!(decision.escalate);
    assert_eq!(decision.trigger, Some(TriggerKind::Boundary));
}

#[test]
fn novelty_alone_escalates() {
    let engine = EscalationEngine::default();
    let decision = engine
        .decide(&ctx(0.1, 0.1, 0.1, 0.8), &est(1.0, 0.9, 1.1))
        .unwrap();
    assert!(decision.escalate);
    assert_eq!(decision.fired_triggers, vec![TriggerKind::Novelty]);
}

#[test]
fn loss_arithmetic_is_reported() {
    let engine = EscalationEngine::default();
    let d = engine
        .decide(&ctx(0.2, 0.1, 0.1, 0.05), &est(0.11, 0.06, 0.17))
        .unwrap();
    assert!((d.p_wrong_escalated - 0.015).abs() < 1e-12);
    assert!((d.loss_screen - 2.25).abs() < 1e-9);
    assert!((d.loss_escalate - 10.675).abs() < 1e-9);
    assert!((d.expected_voi - (d.loss_screen - d.loss_escalate)).abs() < 1e-12);
}

#[test]
fn cheap_escalation_flips_the_decision() {
    let engine = EscalationEngine::default();
    let context = ctx(0.2, 0.1, 0.1, 0.05)
        .with_costs(1.0, 0.25, 45.0, 10.0)
        .unwrap();
    // 2.25 − (0.675 + 1.0) > 0
    let d = engine.decide(&context, &est(0.11, 0.06, 0.17)).unwrap();
    assert!(d.escalate);
    assert_eq!(d.basis, DecisionBasis::PositiveValue);
}

// ---------------------------------------------------------------------------
// Refusals and configuration
// ---------------------------------------------------------------------------

#[test]
fn malformed_estimate_is_refused() {
    let engine = EscalationEngine::default();
    let context = ctx(0.5, 0.5, 0.5, 0.5);
    let bad = [
        IntervalEstimate { point: 0.5, lower: 1.0, upper: 0.0 },
        IntervalEstimate { point: 2.0, lower: 0.0, upper: 1.0 },
        IntervalEstimate { point: f64::NAN, lower: 0.0, upper: 1.0 },
        IntervalEstimate { point: 0.0, lower: f64::NEG_INFINITY, upper: 1.0 },
    ];
    for estimate in bad {
        let err = engine.decide(&context, &estimate).unwrap_err();
        assert!(matches!(err, KingdomError::MalformedEstimate { .. }), "{estimate:?}");
    }
}

#[test]
fn invalid_band_table_is_rejected_at_construction() {
    let increasing = EscalationConfig::default().with_bands(vec![
        ProbabilityBand::new("a", BandCondition::SignAmbiguous, 0.1),
        ProbabilityBand::new("b", BandCondition::Always, 0.4),
    ]);
    assert!(matches!(
        EscalationEngine::new(increasing),
        Err(KingdomError::InvalidConfiguration { .. })
    ));

    let no_fallback = EscalationConfig::default().with_bands(vec![ProbabilityBand::new(
        "a",
        BandCondition::SignAmbiguous,
        0.4,
    )]);
    assert!(EscalationEngine::new(no_fallback).is_err());

    let bad_factor = EscalationConfig {
        uncertainty_reduction_factor: 1.5,
        ..Default::default()
    };
    assert!(EscalationEngine::new(bad_factor).is_err());
}

#[test]
fn custom_bands_and_thresholds_are_honoured() {
    let config = EscalationConfig {
        bands: vec![
            ProbabilityBand::new("very_wide", BandCondition::RatioAbove { ratio: 5.0 }, 0.6),
            ProbabilityBand::new("rest", BandCondition::Always, 0.01),
        ],
        triggers: TriggerThresholds {
            boundary_sensitivity: 0.95,
            ..Default::default()
        },
        ..Default::default()
    };
    let engine = EscalationEngine::new(config).unwrap();

    // Sign ambiguity is no longer a band of its own.
    let d = engine
        .decide(&ctx(0.1, 0.1, 0.9, 0.0), &est(0.05, -0.01, 0.11))
        .unwrap();
    assert_eq!(d.band, "rest");
    assert!(!d.escalate, "0.9 sensitivity is below the raised boundary threshold");

    let d = engine
        .decide(&ctx(0.1, 0.1, 0.1, 0.0), &est(0.1, 0.0, 0.7))
        .unwrap();
    assert_eq!(d.band, "very_wide");
    assert!(d.escalate);
}

// ---------------------------------------------------------------------------
// Determinism and concurrency
// ---------------------------------------------------------------------------

#[test]
fn decide_is_deterministic() {
    let engine = EscalationEngine::default();
    let context = ctx(0.6, 0.3, 0.4, 0.2);
    let estimate = est(0.8, 0.2, 1.9);
    let first = engine.decide(&context, &estimate).unwrap();
    for _ in 0..100 {
        assert_eq!(engine.decide(&context, &estimate).unwrap(), first);
    }
}

#[test]
fn one_engine_scores_from_many_threads() {
    let engine = Arc::new(EscalationEngine::default());
    let expected = engine
        .decide(&ctx(0.85, 0.55, 0.65, 0.20), &est(0.35, 0.15, 0.60))
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                (0..500)
                    .map(|_| {
                        engine
                            .decide(&ctx(0.85, 0.55, 0.65, 0.20), &est(0.35, 0.15, 0.60))
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().iter().all(|d| *d == expected));
    }
}

#[test]
fn engine_is_usable_as_a_trait_object() {
    let policy: Box<dyn IEscalationPolicy> = Box::new(EscalationEngine::default());
    let d = policy
        .decide(&ctx(0.2, 0.1, 0.1, 0.05), &est(0.11, 0.06, 0.17))
        .unwrap();
    assert!(!d.escalate);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn unit() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

proptest! {
    #[test]
    fn prop_escalate_iff_value_or_trigger(
        sev in unit(), unc in unit(), sens in unit(), ood in unit(),
        point in -10.0f64..10.0, below in 0.0f64..5.0, above in 0.0f64..5.0,
    ) {
        let engine = EscalationEngine::default();
        let d = engine.decide(&ctx(sev, unc, sens, ood), &est(point, point - below, point + above)).unwrap();
        prop_assert_eq!(d.escalate, d.expected_voi > 0.0 || !d.fired_triggers.is_empty());
        prop_assert_eq!(d.trigger, d.fired_triggers.first().copied());
        prop_assert!(d.p_wrong_escalated <= d.p_wrong_screen);
    }

    #[test]
    fn prop_wider_interval_never_lowers_p_wrong(
        point in 0.01f64..10.0, narrow in 0.0f64..5.0, extra in 0.0f64..5.0,
    ) {
        let engine = EscalationEngine::default();
        let context = ctx(0.0, 0.0, 0.0, 0.0);
        let tight = engine.decide(&context, &est(point, point - narrow, point + narrow)).unwrap();
        let wide_half = narrow + extra;
        let wide = engine.decide(&context, &est(point, point - wide_half, point + wide_half)).unwrap();
        prop_assert!(tight.p_wrong_screen <= wide.p_wrong_screen);
        prop_assert!(tight.expected_voi <= wide.expected_voi);
    }
}

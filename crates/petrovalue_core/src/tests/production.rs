//! Tests for production profile invariants
//!
//! These tests verify that:
//! - Water cut stays within `[0, BSWmax]` and delivered oil respects capacity
//! - Hyperbolic decline approaches exponential as `b` goes to zero
//! - Cumulative production never exceeds reserves
//! - Production is independent of price

use crate::config::ProjectParameters;
use crate::opex::production_downtime;
use crate::production::{production_profile, water_cut};

fn capacity_cases() -> Vec<ProjectParameters> {
    let base = ProjectParameters::default();
    let base = &base;
    [100_000.0, 200_000.0, 350_000.0, 1_000_000.0]
        .into_iter()
        .flat_map(|capacity| {
            [0.1, 0.3, 0.8].into_iter().map(move |k| {
                let mut params = base.with_water_growth_rate(k);
                params.production.liquid_capacity_bpd = capacity;
                params
            })
        })
        .collect()
}

#[test]
fn test_water_cut_and_capacity_invariants() {
    for params in capacity_cases() {
        let p = &params.production;
        let profile = production_profile(&params, production_downtime(&params.opex));
        for (year, y) in profile.years.iter().enumerate() {
            assert!(
                (0.0..=p.water_cut.max).contains(&y.water_cut),
                "year {year}: water cut {} outside bounds",
                y.water_cut
            );
            if y.oil_volume > 0.0 {
                let t = year as f64 - f64::from(params.economics.first_oil_year);
                let limit = p.liquid_capacity_bpd * (1.0 - water_cut(&p.water_cut, t));
                assert!(
                    y.oil_rate_bpd <= limit + 1e-6,
                    "year {year}: oil {} exceeds limit {limit}",
                    y.oil_rate_bpd
                );
            }
            assert!(y.liquid_volume * 1e6 / 365.0 <= p.liquid_capacity_bpd + 1e-3);
        }
    }
}

#[test]
fn test_decline_continuous_as_b_vanishes() {
    let exponential = ProjectParameters::default().with_hyperbolic_exponent(0.0);
    let nearly = ProjectParameters::default().with_hyperbolic_exponent(1e-5);
    let a = production_profile(&exponential, 0.0).cumulative_oil();
    let b = production_profile(&nearly, 0.0).cumulative_oil();
    assert!((a - b).abs() / a < 1e-3, "exponential {a} vs b=1e-5 {b}");
}

#[test]
fn test_higher_b_holds_production_longer() {
    let low = ProjectParameters::default().with_hyperbolic_exponent(0.0);
    let high = ProjectParameters::default().with_hyperbolic_exponent(1.0);
    assert!(
        production_profile(&high, 0.0).cumulative_oil()
            > production_profile(&low, 0.0).cumulative_oil()
    );
}

#[test]
fn test_cumulative_never_exceeds_reserves() {
    for reserves in [50.0, 300.0, 800.0, 5_000.0] {
        let mut params = ProjectParameters::default();
        params.production.reserves_mmbbl = reserves;
        let profile = production_profile(&params, 0.0);
        assert!(
            profile.cumulative_oil() <= reserves + 1e-9,
            "reserves {reserves}: produced {}",
            profile.cumulative_oil()
        );
    }
}

#[test]
fn test_technology_factor_slows_decline() {
    let base = ProjectParameters::default();
    let improved = base.with_decline_technology(0.25);
    assert!(
        (improved.production.decline_rate.derived_value() - 0.09).abs() < 1e-12,
        "derived decline should be base × (1 - factor)"
    );
    assert!(
        production_profile(&improved, 0.0).cumulative_oil()
            > production_profile(&base, 0.0).cumulative_oil()
    );
}

#[test]
fn test_profile_is_price_independent() {
    let base = ProjectParameters::default();
    let expensive = base.with_price_scale(3.0);
    assert_eq!(
        production_profile(&base, 0.1),
        production_profile(&expensive, 0.1)
    );
}

#[test]
fn test_water_cut_rises_over_field_life() {
    let params = ProjectParameters::default();
    let profile = production_profile(&params, 0.0);
    let producing: Vec<f64> = profile
        .years
        .iter()
        .filter(|y| y.oil_volume > 0.0)
        .map(|y| y.water_cut)
        .collect();
    for pair in producing.windows(2) {
        assert!(pair[1] >= pair[0], "water cut should not fall");
    }
}

//! Production profile: ramp-up, plateau and Arps decline, with a logistic
//! water-cut curve and a facility liquid-handling limit.
//!
//! The profile depends only on subsurface and facility parameters (plus the
//! workover downtime fraction), never on price.

use crate::config::defaults::{DAYS_PER_YEAR, EXPONENTIAL_B_THRESHOLD};
use crate::config::{ProjectParameters, WaterCutParams};
use crate::model::Warning;

/// One year of the production profile
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductionYear {
    /// Oil potential after downtime, before the capacity limit, bpd
    pub potential_rate_bpd: f64,
    /// Delivered oil rate, bpd
    pub oil_rate_bpd: f64,
    pub water_cut: f64,
    /// MMbbl
    pub oil_volume: f64,
    pub water_volume: f64,
    pub liquid_volume: f64,
    /// MMscf
    pub gas_volume: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionProfile {
    pub years: Vec<ProductionYear>,
    pub warnings: Vec<Warning>,
}

impl ProductionProfile {
    #[must_use]
    pub fn oil_volumes(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.oil_volume).collect()
    }

    #[must_use]
    pub fn cumulative_oil(&self) -> f64 {
        self.years.iter().map(|y| y.oil_volume).sum()
    }
}

/// Clamp negative and non-finite rates to zero
fn sanitize(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 { rate } else { 0.0 }
}

/// Arps decline rate `tau` years after decline start.
///
/// `b` below [`EXPONENTIAL_B_THRESHOLD`] takes the exponential branch.
#[must_use]
pub fn arps_rate(q_max: f64, decline: f64, b: f64, tau: f64) -> f64 {
    let q = if b < EXPONENTIAL_B_THRESHOLD {
        q_max * (-decline * tau).exp()
    } else {
        q_max / (1.0 + b * decline * tau).powf(1.0 / b)
    };
    sanitize(q)
}

/// Oil potential `t` years after first oil, before downtime and capacity
#[must_use]
pub fn potential_rate(params: &ProjectParameters, t: u32) -> f64 {
    let p = &params.production;
    let ramp = p.ramp_up_years;
    let plateau_end = ramp.saturating_add(p.plateau_years);
    let decline_end = plateau_end.saturating_add(p.decline_years);

    let q = if t < ramp {
        // Annual average of a linear ramp from zero to peak
        p.peak_rate_bpd * (f64::from(t) + 0.5) / f64::from(ramp)
    } else if t < plateau_end {
        p.peak_rate_bpd
    } else if t < decline_end {
        arps_rate(
            p.peak_rate_bpd,
            p.decline_rate.derived_value(),
            p.hyperbolic_exponent,
            f64::from(t - plateau_end),
        )
    } else {
        0.0
    };
    sanitize(q)
}

/// Logistic water cut `t` years after first oil, in `[0, max]`
#[must_use]
pub fn water_cut(params: &WaterCutParams, t: f64) -> f64 {
    let bsw = params.max / (1.0 + (-params.growth_rate * (t - params.breakthrough_year)).exp());
    if bsw.is_finite() {
        bsw.clamp(0.0, params.max)
    } else {
        0.0
    }
}

/// Delivered oil rate under the liquid-handling limit; the excess is lost
#[must_use]
pub fn capped_oil_rate(potential: f64, capacity: f64, water_cut: f64) -> f64 {
    sanitize(potential.min(capacity * (1.0 - water_cut)))
}

/// Water rate accompanying `oil_rate`, bounded by the spare capacity
#[must_use]
pub fn water_rate(oil_rate: f64, capacity: f64, water_cut: f64) -> f64 {
    if water_cut >= 1.0 {
        return 0.0;
    }
    let water = oil_rate * water_cut / (1.0 - water_cut);
    sanitize(water.min(capacity - oil_rate))
}

fn to_annual_volume(rate_bpd: f64) -> f64 {
    rate_bpd * DAYS_PER_YEAR / 1e6
}

/// Build the production profile for years `0..=duration`.
///
/// `downtime_fraction` is the share of well-time lost to workovers.
pub fn production_profile(params: &ProjectParameters, downtime_fraction: f64) -> ProductionProfile {
    let p = &params.production;
    let first_oil = params.economics.first_oil_year;
    let decom_start = params.decommissioning_start_year();
    let capacity = p.liquid_capacity_bpd.max(0.0);
    let uptime = (1.0 - downtime_fraction).clamp(0.0, 1.0);

    let mut warnings = Vec::new();
    if capacity <= 0.0 && p.peak_rate_bpd > 0.0 {
        warnings.push(Warning::ZeroCapacity);
    }

    let mut years = Vec::with_capacity(params.record_count());
    let mut remaining = p.reserves_mmbbl.max(0.0);

    for year in 0..=params.economics.duration_years {
        if year < first_oil || year >= decom_start {
            years.push(ProductionYear::default());
            continue;
        }
        let t = year - first_oil;
        let bsw = water_cut(&p.water_cut, f64::from(t));
        let potential = potential_rate(params, t) * uptime;
        let mut oil_rate = capped_oil_rate(potential, capacity, bsw);
        let mut oil_volume = to_annual_volume(oil_rate);

        if oil_volume > remaining {
            if remaining > 0.0 {
                warnings.push(Warning::ReservesExhausted { year });
            }
            oil_volume = remaining;
            oil_rate = oil_volume * 1e6 / DAYS_PER_YEAR;
        }
        remaining -= oil_volume;

        let water_volume = to_annual_volume(water_rate(oil_rate, capacity, bsw));
        years.push(ProductionYear {
            potential_rate_bpd: potential,
            oil_rate_bpd: oil_rate,
            water_cut: if oil_volume > 0.0 { bsw } else { 0.0 },
            oil_volume,
            water_volume,
            liquid_volume: oil_volume + water_volume,
            gas_volume: oil_volume * p.gas_oil_ratio,
        });
    }

    ProductionProfile { years, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arps_hyperbolic() {
        // b = 1 is harmonic decline: q = qmax / (1 + Di t)
        let q = arps_rate(1_000.0, 0.2, 1.0, 5.0);
        assert!((q - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_arps_exponential_branch() {
        let q = arps_rate(1_000.0, 0.1, 0.0, 10.0);
        assert!((q - 1_000.0 * (-1.0f64).exp()).abs() < 1e-9);

        // Tiny b converges to the exponential result
        let near = arps_rate(1_000.0, 0.1, 1e-5, 10.0);
        assert!((near - q).abs() < 0.1);
    }

    #[test]
    fn test_ramp_plateau_decline() {
        let params = ProjectParameters::default();
        let peak = params.production.peak_rate_bpd;
        let q0 = potential_rate(&params, 0);
        assert!((q0 - peak * 0.5 / 3.0).abs() < 1e-9);
        assert_eq!(potential_rate(&params, 3), peak);
        assert_eq!(potential_rate(&params, 6), peak);
        assert!(potential_rate(&params, 7) == peak);
        assert!(potential_rate(&params, 8) < peak);
        assert_eq!(potential_rate(&params, 3 + 4 + 19), 0.0);
    }

    #[test]
    fn test_water_cut_bounds_and_monotonicity() {
        let wc = WaterCutParams {
            max: 0.9,
            growth_rate: 0.5,
            breakthrough_year: 5.0,
        };
        assert!((water_cut(&wc, 5.0) - 0.45).abs() < 1e-12);
        let mut prev = 0.0;
        for t in 0..40 {
            let bsw = water_cut(&wc, f64::from(t));
            assert!((0.0..=0.9).contains(&bsw));
            assert!(bsw >= prev);
            prev = bsw;
        }
    }

    #[test]
    fn test_capacity_cap_loses_excess() {
        let oil = capped_oil_rate(200_000.0, 250_000.0, 0.5);
        assert_eq!(oil, 125_000.0);
        let water = water_rate(oil, 250_000.0, 0.5);
        assert_eq!(water, 125_000.0);
        // Oil below the limit: water bounded by spare capacity
        let water = water_rate(100_000.0, 150_000.0, 0.8);
        assert_eq!(water, 50_000.0);
    }

    #[test]
    fn test_zero_capacity_disables_oil() {
        let mut params = ProjectParameters::default();
        params.production.liquid_capacity_bpd = 0.0;
        let profile = production_profile(&params, 0.0);
        assert_eq!(profile.cumulative_oil(), 0.0);
        assert!(profile.warnings.contains(&Warning::ZeroCapacity));
    }

    #[test]
    fn test_profile_respects_reserves() {
        let mut params = ProjectParameters::default();
        params.production.reserves_mmbbl = 200.0;
        let profile = production_profile(&params, 0.0);
        assert!(profile.cumulative_oil() <= 200.0 + 1e-9);
        assert!(
            profile
                .warnings
                .iter()
                .any(|w| matches!(w, Warning::ReservesExhausted { .. }))
        );
    }

    #[test]
    fn test_no_production_before_first_oil_or_during_decommissioning() {
        let params = ProjectParameters::default();
        let profile = production_profile(&params, 0.0);
        assert_eq!(profile.years.len(), 31);
        for year in 0..params.economics.first_oil_year as usize {
            assert_eq!(profile.years[year].oil_volume, 0.0);
        }
        assert_eq!(profile.years[30].oil_volume, 0.0);
        assert!(profile.years[4].oil_volume > 0.0);
    }

    #[test]
    fn test_phase_lengths_saturate() {
        let mut params = ProjectParameters::default();
        params.production.plateau_years = u32::MAX - 1;
        params.production.decline_years = u32::MAX;
        let peak = params.production.peak_rate_bpd;
        assert_eq!(potential_rate(&params, 10), peak);
        assert_eq!(potential_rate(&params, u32::MAX - 1), peak);
        assert_eq!(potential_rate(&params, u32::MAX), 0.0);
    }

    #[test]
    fn test_downtime_reduces_potential() {
        let params = ProjectParameters::default();
        let full = production_profile(&params, 0.0);
        let reduced = production_profile(&params, 0.2);
        assert!(reduced.cumulative_oil() < full.cumulative_oil());
    }
}

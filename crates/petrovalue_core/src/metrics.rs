//! Investment metrics over a free cash flow series
//!
//! NPV and its discount-rate profile, IRR, nominal and discounted payback,
//! and the summary `Metrics` of an evaluation. Breakeven price is solved in
//! `evaluate`, since it re-runs the whole pipeline.

use std::convert::Infallible;

use crate::error::{EngineError, SolvedQuantity};
use crate::model::{Metrics, NpvPoint, Payback, Warning, YearlyRecord};
use crate::solver::{SolverConfig, find_root, linear_grid};

/// Upper end of the IRR search
pub const IRR_MAX_RATE: f64 = 5.0;
/// Lower end of the IRR search; rates at or below -100% are meaningless
pub const IRR_MIN_RATE: f64 = -0.95;
/// Spacing of the IRR bracketing grid
const IRR_GRID_STEP: f64 = 0.01;

/// Net present value of `flows` at `rate`, year 0 undiscounted
#[must_use]
pub fn npv(flows: &[f64], rate: f64) -> f64 {
    let base = 1.0 + rate;
    let mut factor = 1.0;
    let mut total = 0.0;
    for flow in flows {
        total += flow * factor;
        factor /= base;
    }
    total
}

/// Discount rates 0% to 30% in 1% steps
#[must_use]
pub fn default_rate_grid() -> Vec<f64> {
    (0..=30).map(|pct| f64::from(pct) / 100.0).collect()
}

#[must_use]
pub fn npv_profile(flows: &[f64], rates: &[f64]) -> Vec<NpvPoint> {
    rates
        .iter()
        .map(|&rate| NpvPoint {
            rate,
            npv: npv(flows, rate),
        })
        .collect()
}

fn irr_failure(reason: impl Into<String>) -> EngineError {
    EngineError::NumericalNonConvergence {
        quantity: SolvedQuantity::Irr,
        reason: reason.into(),
    }
}

/// Internal rate of return.
///
/// Rates from 0% upward are scanned first and the first bracketed root is
/// taken; only when none exists are negative rates scanned, from 0% down.
/// A terminal decommissioning outflow gives a second sign change, and this
/// order selects the economically meaningful root.
pub fn irr(flows: &[f64], config: &SolverConfig) -> Result<f64, EngineError> {
    let has_inflow = flows.iter().any(|f| *f > 0.0);
    let has_outflow = flows.iter().any(|f| *f < 0.0);
    if !(has_inflow && has_outflow) {
        return Err(irr_failure("cash flows never change sign"));
    }

    let upward_steps = (IRR_MAX_RATE / IRR_GRID_STEP).round() as usize;
    let downward_steps = (-IRR_MIN_RATE / IRR_GRID_STEP).round() as usize;
    let grids = [
        linear_grid(0.0, IRR_MAX_RATE, upward_steps),
        linear_grid(0.0, IRR_MIN_RATE, downward_steps),
    ];

    for grid in &grids {
        let Ok(result) = find_root(grid, |rate| Ok::<_, Infallible>(npv(flows, rate)), config);
        if let Some(rate) = result.root {
            if !result.converged() {
                return Err(irr_failure(format!(
                    "bisection stopped after {} iterations",
                    result.iterations
                )));
            }
            return Ok(rate);
        }
    }
    Err(irr_failure(format!(
        "NPV does not change sign between {IRR_MIN_RATE} and {IRR_MAX_RATE}"
    )))
}

/// Fractional years until cumulative cash flow first turns non-negative.
///
/// Interpolates linearly within the crossing year:
/// `t* - 1 + |cum(t* - 1)| / flow(t*)`.
#[must_use]
pub fn payback(flows: &[f64]) -> Payback {
    let mut cumulative = 0.0;
    for (year, flow) in flows.iter().enumerate() {
        let previous = cumulative;
        cumulative += flow;
        if cumulative >= 0.0 {
            if year == 0 {
                return Payback::Years(0.0);
            }
            return Payback::Years((year - 1) as f64 + previous.abs() / flow);
        }
    }
    Payback::NotReached
}

#[must_use]
pub fn discounted_payback(flows: &[f64], rate: f64) -> Payback {
    let discounted: Vec<f64> = flows
        .iter()
        .enumerate()
        .map(|(year, flow)| flow / (1.0 + rate).powi(year as i32))
        .collect();
    payback(&discounted)
}

/// Summary metrics of a set of records, without the breakeven price.
///
/// An unavailable IRR is reported as `None` plus a warning.
pub fn summarize(
    records: &[YearlyRecord],
    discount_rate: f64,
    config: &SolverConfig,
    warnings: &mut Vec<Warning>,
) -> Metrics {
    let flows: Vec<f64> = records.iter().map(|r| r.free_cash_flow).collect();
    let npv_value = npv(&flows, discount_rate);

    let irr = match irr(&flows, config) {
        Ok(rate) => Some(rate),
        Err(e) => {
            tracing::warn!(error = %e, "IRR unavailable");
            warnings.push(Warning::IrrUnavailable {
                reason: e.to_string(),
            });
            None
        }
    };

    let capex: Vec<f64> = records.iter().map(|r| r.capex_outlay).collect();
    let pv_capex = npv(&capex, discount_rate);

    Metrics {
        discount_rate,
        npv: npv_value,
        irr,
        irr_spread: irr.map(|rate| rate - discount_rate),
        npv_investment_ratio: (pv_capex > 0.0).then(|| npv_value / pv_capex),
        payback: payback(&flows),
        discounted_payback: discounted_payback(&flows, discount_rate),
        breakeven: None,
        total_capex: capex.iter().sum(),
        pv_capex,
        cumulative_oil: records.iter().map(|r| r.oil_volume).sum(),
        total_revenue: records.iter().map(|r| r.revenue).sum(),
        total_government_take: records.iter().map(|r| r.government_take).sum(),
        total_corporate_tax: records.iter().map(|r| r.corporate_tax).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npv() {
        let flows = [-100.0, 60.0, 60.0];
        let expected = -100.0 + 60.0 / 1.1 + 60.0 / 1.21;
        assert!((npv(&flows, 0.1) - expected).abs() < 1e-9);
        assert_eq!(npv(&flows, 0.0), 20.0);
    }

    #[test]
    fn test_irr_simple() {
        // -100 then 110: IRR is exactly 10%
        let rate = irr(&[-100.0, 110.0], &SolverConfig::default()).unwrap();
        assert!((rate - 0.10).abs() < 1e-8, "irr {rate}");
    }

    #[test]
    fn test_irr_negative_rate() {
        let rate = irr(&[-100.0, 50.0, 30.0], &SolverConfig::default()).unwrap();
        assert!(rate < 0.0);
        assert!(npv(&[-100.0, 50.0, 30.0], rate).abs() < 1e-6);
    }

    #[test]
    fn test_irr_prefers_non_negative_root_with_terminal_outflow() {
        let flows = [-1_000.0, 400.0, 400.0, 400.0, 400.0, -150.0];
        let rate = irr(&flows, &SolverConfig::default()).unwrap();
        assert!(rate > 0.0, "irr {rate}");
        assert!(npv(&flows, rate).abs() < 1e-6);
    }

    #[test]
    fn test_irr_without_sign_change() {
        let err = irr(&[100.0, 100.0], &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::NumericalNonConvergence {
                quantity: SolvedQuantity::Irr,
                ..
            }
        ));
    }

    #[test]
    fn test_payback_interpolates() {
        let p = payback(&[-100.0, 50.0, 100.0]);
        assert_eq!(p, Payback::Years(1.5));
    }

    #[test]
    fn test_payback_immediate_and_never() {
        assert_eq!(payback(&[10.0, -5.0]), Payback::Years(0.0));
        assert_eq!(payback(&[-10.0, 5.0]), Payback::NotReached);
    }

    #[test]
    fn test_npv_profile_grid() {
        let profile = npv_profile(&[-100.0, 60.0, 60.0], &default_rate_grid());
        assert_eq!(profile.len(), 31);
        assert_eq!(profile[0].rate, 0.0);
        assert!((profile[30].rate - 0.30).abs() < 1e-12);
    }
}

//! Operating costs
//!
//! Simple mode charges a fixed margin of revenue. Detailed mode builds opex
//! from an inflated fixed cost, a per-barrel variable cost and a workover
//! campaign sized from a well failure rate.

use crate::config::defaults::{DAYS_PER_YEAR, MAX_DOWNTIME_FRACTION};
use crate::config::{CompletionComplexity, OpexMode, OpexParams, ProjectParameters, WellType, WorkoverParams};

/// Cost of a single workover intervention
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterventionCost {
    /// Rig mobilization, MMUSD
    pub mobilization: f64,
    /// Rig day rate, MMUSD/day
    pub daily_rate: f64,
    pub duration_days: f64,
}

/// Intervention cost by well type and completion complexity
#[must_use]
pub fn intervention_cost(well_type: WellType, completion: CompletionComplexity) -> InterventionCost {
    let (mobilization, daily_rate, duration_days) = match (well_type, completion) {
        (WellType::PreSalt, CompletionComplexity::High) => (8.0, 0.6, 45.0),
        (WellType::PreSalt, CompletionComplexity::Low) => (6.0, 0.5, 30.0),
        (WellType::PostSalt, CompletionComplexity::High) => (4.0, 0.35, 30.0),
        (WellType::PostSalt, CompletionComplexity::Low) => (3.0, 0.3, 20.0),
    };
    InterventionCost {
        mobilization,
        daily_rate,
        duration_days,
    }
}

/// Annual workover spend across all wells, MMUSD
#[must_use]
pub fn annual_workover_cost(params: &WorkoverParams) -> f64 {
    let cost = intervention_cost(params.well_type, params.completion);
    let per_intervention =
        cost.mobilization + cost.daily_rate * params.rig_rate_multiplier * cost.duration_days;
    (f64::from(params.well_count) * params.failure_rate * per_intervention).max(0.0)
}

/// Share of well-time lost to waiting for and performing workovers
#[must_use]
pub fn downtime_fraction(params: &WorkoverParams) -> f64 {
    let cost = intervention_cost(params.well_type, params.completion);
    let lost_days = params.failure_rate * (params.wait_days + cost.duration_days);
    (lost_days / DAYS_PER_YEAR).clamp(0.0, MAX_DOWNTIME_FRACTION)
}

/// Downtime applied to production for the configured opex mode
#[must_use]
pub fn production_downtime(opex: &OpexParams) -> f64 {
    match opex.mode {
        OpexMode::Simple => 0.0,
        OpexMode::Detailed => downtime_fraction(&opex.workover),
    }
}

/// Operating cost of one year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OpexYear {
    /// Total opex including workover and charter
    pub total: f64,
    pub workover: f64,
    pub charter: f64,
}

/// Opex per project year.
///
/// Costs are charged only in producing years; the charter payment is added
/// in either mode.
pub fn opex_schedule(
    params: &ProjectParameters,
    oil_volumes: &[f64],
    revenue: &[f64],
    charter: &[f64],
) -> Vec<OpexYear> {
    let opex = &params.opex;
    let workover = annual_workover_cost(&opex.workover);
    let inflation = params.economics.inflation_rate;

    oil_volumes
        .iter()
        .enumerate()
        .map(|(year, &volume)| {
            let charter = charter.get(year).copied().unwrap_or(0.0);
            if volume <= 0.0 {
                return OpexYear {
                    total: charter,
                    workover: 0.0,
                    charter,
                };
            }
            let (operating, workover) = match opex.mode {
                OpexMode::Simple => (revenue[year] * opex.margin, 0.0),
                OpexMode::Detailed => {
                    let fixed = opex.fixed_annual * (1.0 + inflation).powi(year as i32);
                    // USD/bbl × MMbbl = MMUSD
                    let variable = opex.variable_per_bbl * volume;
                    (fixed + variable + workover, workover)
                }
            };
            OpexYear {
                total: operating + charter,
                workover,
                charter,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workover_cost() {
        let params = WorkoverParams {
            well_count: 10,
            failure_rate: 0.2,
            well_type: WellType::PostSalt,
            completion: CompletionComplexity::Low,
            rig_rate_multiplier: 1.0,
            wait_days: 30.0,
        };
        // 10 × 0.2 × (3 + 0.3 × 20) = 18
        assert!((annual_workover_cost(&params) - 18.0).abs() < 1e-12);

        let doubled = WorkoverParams {
            rig_rate_multiplier: 2.0,
            ..params
        };
        assert!((annual_workover_cost(&doubled) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_downtime_fraction_is_capped() {
        let mut params = WorkoverParams::default();
        params.failure_rate = 0.15;
        params.wait_days = 30.0;
        // 0.15 × (30 + 45) / 365
        assert!((downtime_fraction(&params) - 0.15 * 75.0 / 365.0).abs() < 1e-12);

        params.failure_rate = 20.0;
        assert_eq!(downtime_fraction(&params), MAX_DOWNTIME_FRACTION);
    }

    #[test]
    fn test_simple_mode_has_no_downtime() {
        let mut opex = OpexParams::default();
        opex.mode = OpexMode::Simple;
        assert_eq!(production_downtime(&opex), 0.0);
    }

    #[test]
    fn test_detailed_opex_only_in_producing_years() {
        let params = ProjectParameters::default();
        let volumes = [0.0, 10.0, 10.0];
        let revenue = [0.0, 800.0, 800.0];
        let charter = [0.0; 3];
        let schedule = opex_schedule(&params, &volumes, &revenue, &charter);
        assert_eq!(schedule[0].total, 0.0);

        let workover = annual_workover_cost(&params.opex.workover);
        let expected = 200.0 * 1.02 + 8.0 * 10.0 + workover;
        assert!((schedule[1].total - expected).abs() < 1e-9);
        assert!(schedule[2].total > schedule[1].total);
    }

    #[test]
    fn test_simple_opex_is_revenue_margin() {
        let mut params = ProjectParameters::default();
        params.opex.mode = OpexMode::Simple;
        let schedule = opex_schedule(&params, &[5.0], &[400.0], &[25.0]);
        assert!((schedule[0].total - (400.0 * 0.30 + 25.0)).abs() < 1e-12);
        assert_eq!(schedule[0].charter, 25.0);
    }
}

//! Evaluation pipeline
//!
//! Runs production, price, capex, opex, fiscal and cash flow in dependency
//! order over one parameter snapshot, then derives the metrics. `run` adds
//! the sensitivity analyses and never fails: errors are carried in
//! `Results::error`.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::analysis::{MonteCarloConfig, TornadoConfig, run_monte_carlo, run_tornado};
use crate::capex::capex_schedule;
use crate::cash_flow::{CashFlowInputs, assemble_records, decommissioning_schedule, revenue_schedule};
use crate::config::{ProjectParameters, validate};
use crate::error::{EngineError, Result, SolvedQuantity};
use crate::fiscal::{FiscalBase, fiscal_schedule};
use crate::metrics::{default_rate_grid, npv, npv_profile, summarize};
use crate::model::{Breakeven, Evaluation, Metrics, Results, Warning, YearlyRecord};
use crate::opex::{opex_schedule, production_downtime};
use crate::price::price_curve;
use crate::production::production_profile;
use crate::solver::{SolverConfig, find_root, linear_grid};

/// Search range of the breakeven price scale
pub const BREAKEVEN_MAX_SCALE: f64 = 20.0;
const BREAKEVEN_GRID_STEPS: usize = 80;

/// Which analyses `run` performs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// `None` skips the tornado analysis
    pub tornado: Option<TornadoConfig>,
    /// `None` skips Monte Carlo sampling
    pub monte_carlo: Option<MonteCarloConfig>,
    pub solver: SolverConfig,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            tornado: Some(TornadoConfig::default()),
            monte_carlo: Some(MonteCarloConfig::default()),
            solver: SolverConfig::default(),
        }
    }
}

impl RunOptions {
    /// Base evaluation only
    #[must_use]
    pub fn evaluation_only() -> Self {
        Self {
            tornado: None,
            monte_carlo: None,
            ..Default::default()
        }
    }
}

/// Yearly records of an already-validated snapshot
fn build_records(params: &ProjectParameters) -> (Vec<YearlyRecord>, Vec<Warning>) {
    let downtime = production_downtime(&params.opex);
    let production = production_profile(params, downtime);
    let volumes = production.oil_volumes();

    let prices = price_curve(
        &params.price,
        params.production.api_gravity,
        params.economics.duration_years,
    );
    let revenue = revenue_schedule(&production, &prices, &params.price);
    let capex = capex_schedule(params, &volumes);
    let opex = opex_schedule(params, &volumes, &revenue, &capex.charter);

    let bases: Vec<FiscalBase> = (0..params.record_count())
        .map(|year| FiscalBase {
            revenue: revenue[year],
            opex: opex[year].total,
            depreciation: capex.depreciation(year),
            capex_outlay: capex.outlay(year),
        })
        .collect();
    let fiscal = fiscal_schedule(&params.fiscal, &bases);
    let decommissioning = decommissioning_schedule(params);

    let records = assemble_records(
        params,
        &CashFlowInputs {
            production: &production,
            prices: &prices,
            revenue: &revenue,
            capex: &capex,
            opex: &opex,
            fiscal: &fiscal,
            decommissioning: &decommissioning,
        },
    );
    (records, production.warnings)
}

/// Records whose cash flow lines overflowed have no sound fallback
fn check_finite(records: &[YearlyRecord]) -> Result<()> {
    match records.iter().find(|r| {
        !(r.free_cash_flow.is_finite()
            && r.cumulative_cash_flow.is_finite()
            && r.cumulative_discounted_cash_flow.is_finite())
    }) {
        Some(r) => Err(EngineError::ArithmeticDegeneracy {
            context: format!("cash flow of year {} is not finite", r.year),
        }),
        None => Ok(()),
    }
}

fn project_npv(params: &ProjectParameters) -> f64 {
    let (records, _) = build_records(params);
    let flows: Vec<f64> = records.iter().map(|r| r.free_cash_flow).collect();
    npv(&flows, params.economics.discount_rate)
}

/// Price scale at which NPV is zero, searched over `[0, 20]`
pub fn breakeven(params: &ProjectParameters, config: &SolverConfig) -> Result<Breakeven> {
    validate(params)?;
    let grid = linear_grid(0.0, BREAKEVEN_MAX_SCALE, BREAKEVEN_GRID_STEPS);
    let Ok(result) = find_root(
        &grid,
        |scale| Ok::<_, Infallible>(project_npv(&params.with_price_scale(scale))),
        config,
    );

    match result.root {
        Some(scale) if result.converged() => Ok(Breakeven {
            price_scale: scale,
            price: scale * params.price.initial_price,
        }),
        Some(_) => Err(EngineError::NumericalNonConvergence {
            quantity: SolvedQuantity::BreakevenPrice,
            reason: format!("bisection stopped after {} iterations", result.iterations),
        }),
        None => Err(EngineError::NumericalNonConvergence {
            quantity: SolvedQuantity::BreakevenPrice,
            reason: format!("NPV does not change sign for price scales 0 to {BREAKEVEN_MAX_SCALE}"),
        }),
    }
}

/// Metrics without breakeven or NPV profile; used by sensitivity runs
pub fn evaluate_metrics(params: &ProjectParameters) -> Result<(Metrics, Vec<Warning>)> {
    validate(params)?;
    let (records, mut warnings) = build_records(params);
    check_finite(&records)?;
    let metrics = summarize(
        &records,
        params.economics.discount_rate,
        &SolverConfig::default(),
        &mut warnings,
    );
    Ok((metrics, warnings))
}

fn evaluate_with(params: &ProjectParameters, solver: &SolverConfig) -> Result<Evaluation> {
    validate(params)?;
    let (records, mut warnings) = build_records(params);
    check_finite(&records)?;
    for warning in &warnings {
        tracing::warn!(?warning, "production profile");
    }
    let rate = params.economics.discount_rate;
    let mut metrics = summarize(&records, rate, solver, &mut warnings);

    match breakeven(params, solver) {
        Ok(b) => metrics.breakeven = Some(b),
        Err(e) => {
            tracing::warn!(error = %e, "breakeven price unavailable");
            warnings.push(Warning::BreakevenUnavailable {
                reason: e.to_string(),
            });
        }
    }

    let flows: Vec<f64> = records.iter().map(|r| r.free_cash_flow).collect();
    let npv_profile = npv_profile(&flows, &default_rate_grid());

    tracing::debug!(
        npv = metrics.npv,
        irr = ?metrics.irr,
        cumulative_oil = metrics.cumulative_oil,
        warnings = warnings.len(),
        "evaluation complete"
    );

    Ok(Evaluation {
        records,
        metrics,
        npv_profile,
        warnings,
    })
}

/// Evaluate one parameter snapshot.
///
/// Pure: the same parameters always give the same evaluation.
pub fn evaluate(params: &ProjectParameters) -> Result<Evaluation> {
    evaluate_with(params, &SolverConfig::default())
}

fn sensitivity_failed(evaluation: &mut Evaluation, analysis: &str, error: &EngineError) {
    tracing::warn!(analysis, %error, "sensitivity analysis failed");
    evaluation.warnings.push(Warning::SensitivityUnavailable {
        analysis: analysis.to_string(),
        reason: error.to_string(),
    });
}

/// Base evaluation plus the sensitivity analyses selected in `options`
#[must_use]
pub fn run(params: &ProjectParameters, options: &RunOptions) -> Results {
    let mut evaluation = match evaluate_with(params, &options.solver) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            tracing::warn!(error = %e, "evaluation failed");
            return Results::failed(e);
        }
    };

    let tornado = match options.tornado.as_ref().map(|c| run_tornado(params, c)) {
        Some(Ok(scenarios)) => scenarios,
        Some(Err(e)) => {
            sensitivity_failed(&mut evaluation, "tornado", &e);
            Vec::new()
        }
        None => Vec::new(),
    };

    let monte_carlo = match options.monte_carlo.as_ref().map(|c| run_monte_carlo(params, c)) {
        Some(Ok(summary)) => Some(summary),
        Some(Err(e)) => {
            sensitivity_failed(&mut evaluation, "monte_carlo", &e);
            None
        }
        None => None,
    };

    Results {
        evaluation: Some(evaluation),
        tornado,
        monte_carlo,
        error: None,
    }
}

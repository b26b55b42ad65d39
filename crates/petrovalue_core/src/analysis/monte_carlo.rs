//! Monte Carlo sampling of development and cost uncertainty.
//!
//! Each sample perturbs a fixed set of inputs with uniform draws around the
//! base case and re-runs the pipeline. Per-sample seeds are drawn from the
//! master RNG before any sample runs, so results do not depend on how the
//! samples are scheduled.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ProjectParameters;
use crate::config::defaults::MAX_PHASE_YEARS;
use crate::error::Result;
use crate::evaluate::evaluate_metrics;

use super::stats::{Distribution, TrendLine, linear_fit, pearson};
use super::{MonteCarloConfig, PerturbationRanges};

/// The perturbed inputs of one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledInputs {
    pub total_capex: f64,
    pub capex_concentration: f64,
    pub capex_peak_year: u32,
    pub ramp_up_years: u32,
    pub plateau_years: u32,
    pub decline_years: u32,
    pub peak_rate_bpd: f64,
    pub opex_margin: f64,
    pub fixed_opex: f64,
    pub variable_opex: f64,
}

impl SampledInputs {
    /// Copy of `base` carrying these inputs
    #[must_use]
    pub fn apply(&self, base: &ProjectParameters) -> ProjectParameters {
        let mut params = base.clone();
        params.capex.total = self.total_capex;
        params.capex.concentration = self.capex_concentration;
        params.capex.peak_year = self.capex_peak_year;
        params.production.ramp_up_years = self.ramp_up_years;
        params.production.plateau_years = self.plateau_years;
        params.production.decline_years = self.decline_years;
        params.production.peak_rate_bpd = self.peak_rate_bpd;
        params.opex.margin = self.opex_margin;
        params.opex.fixed_annual = self.fixed_opex;
        params.opex.variable_per_bbl = self.variable_opex;
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSample {
    pub inputs: SampledInputs,
    pub npv: f64,
    pub irr: Option<f64>,
    pub npv_investment_ratio: Option<f64>,
}

impl MonteCarloSample {
    /// `(IRR - r, NPV / investment)` when both are defined
    #[must_use]
    pub fn scatter_point(&self, discount_rate: f64) -> Option<(f64, f64)> {
        Some((self.irr? - discount_rate, self.npv_investment_ratio?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    pub samples: Vec<MonteCarloSample>,
    /// Seed the run was started from, if fixed
    pub seed: Option<u64>,
    pub discount_rate: f64,
    pub npv: Option<Distribution>,
    /// Pearson correlation of IRR spread against NPV / investment
    pub correlation: Option<f64>,
    /// NPV / investment regressed on IRR spread
    pub trend: Option<TrendLine>,
}

impl MonteCarloSummary {
    /// Samples with both IRR and NPV / investment defined
    #[must_use]
    pub fn scatter(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .filter_map(|s| s.scatter_point(self.discount_rate))
            .collect()
    }
}

/// `base` scaled by a uniform factor in `[1 - pct, 1 + pct]`, never negative
fn scaled<R: Rng>(rng: &mut R, base: f64, pct: f64) -> f64 {
    if pct <= 0.0 {
        return base;
    }
    (base * rng.random_range((1.0 - pct)..=(1.0 + pct))).max(0.0)
}

/// Like [`scaled`], clamped to `[0, 1]`
fn scaled_fraction<R: Rng>(rng: &mut R, base: f64, pct: f64) -> f64 {
    scaled(rng, base, pct).clamp(0.0, 1.0)
}

fn shifted<R: Rng>(rng: &mut R, base: u32, spread: u32, min: u32) -> u32 {
    let low = base.saturating_sub(spread).max(min);
    let high = base.saturating_add(spread).min(MAX_PHASE_YEARS).max(low);
    rng.random_range(low..=high)
}

/// Draw one set of perturbed inputs around `base`
pub fn sample_inputs<R: Rng>(rng: &mut R, base: &ProjectParameters, ranges: &PerturbationRanges) -> SampledInputs {
    let capex = &base.capex;
    let production = &base.production;
    let opex = &base.opex;
    SampledInputs {
        total_capex: scaled(rng, capex.total, ranges.capex_pct),
        capex_concentration: rng.random_range(0.0..=1.0),
        capex_peak_year: rng.random_range(0..capex.duration_years.max(1)),
        ramp_up_years: shifted(rng, production.ramp_up_years, ranges.ramp_up_years, 1),
        plateau_years: shifted(rng, production.plateau_years, ranges.plateau_years, 0),
        decline_years: shifted(rng, production.decline_years, ranges.decline_years, 1),
        peak_rate_bpd: scaled(rng, production.peak_rate_bpd, ranges.peak_rate_pct),
        opex_margin: scaled_fraction(rng, opex.margin, ranges.opex_margin_pct),
        fixed_opex: scaled(rng, opex.fixed_annual, ranges.fixed_opex_pct),
        variable_opex: scaled(rng, opex.variable_per_bbl, ranges.variable_opex_pct),
    }
}

fn run_sample(base: &ProjectParameters, ranges: &PerturbationRanges, seed: u64) -> Result<MonteCarloSample> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let inputs = sample_inputs(&mut rng, base, ranges);
    let (metrics, _) = evaluate_metrics(&inputs.apply(base))?;
    Ok(MonteCarloSample {
        inputs,
        npv: metrics.npv,
        irr: metrics.irr,
        npv_investment_ratio: metrics.npv_investment_ratio,
    })
}

/// Run `config.samples` perturbed evaluations of `base`
pub fn run_monte_carlo(base: &ProjectParameters, config: &MonteCarloConfig) -> Result<MonteCarloSummary> {
    let mut master = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let seeds: Vec<u64> = (0..config.samples).map(|_| master.next_u64()).collect();

    #[cfg(feature = "parallel")]
    let samples: Result<Vec<MonteCarloSample>> = seeds
        .into_par_iter()
        .map(|seed| run_sample(base, &config.ranges, seed))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let samples: Result<Vec<MonteCarloSample>> = seeds
        .into_iter()
        .map(|seed| run_sample(base, &config.ranges, seed))
        .collect();

    let samples = samples?;
    let discount_rate = base.economics.discount_rate;
    let npvs: Vec<f64> = samples.iter().map(|s| s.npv).collect();

    let mut summary = MonteCarloSummary {
        samples,
        seed: config.seed,
        discount_rate,
        npv: Distribution::from_values(&npvs),
        correlation: None,
        trend: None,
    };
    let (xs, ys): (Vec<f64>, Vec<f64>) = summary.scatter().into_iter().unzip();
    summary.correlation = pearson(&xs, &ys);
    summary.trend = linear_fit(&xs, &ys);

    tracing::info!(
        samples = summary.samples.len(),
        defined = xs.len(),
        correlation = ?summary.correlation,
        "Monte Carlo analysis complete"
    );
    Ok(summary)
}

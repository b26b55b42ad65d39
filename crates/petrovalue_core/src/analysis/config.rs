//! Configuration types for sensitivity analysis.

use serde::{Deserialize, Serialize};

use crate::config::ProjectParameters;

/// Default Monte Carlo sample count
pub const DEFAULT_SAMPLES: usize = 500;

/// An input varied one-at-a-time by the tornado analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TornadoVariable {
    /// Multiplier on total capex
    CapexMultiplier,
    WorkoverFailureRate,
    RigRateMultiplier,
    WorkoverWaitDays,
    /// Base decline rate (the effective rate is re-derived)
    DeclineRate,
    HyperbolicExponent,
    WaterBreakthroughYear,
    WaterGrowthRate,
}

impl TornadoVariable {
    pub const ALL: [TornadoVariable; 8] = [
        TornadoVariable::CapexMultiplier,
        TornadoVariable::WorkoverFailureRate,
        TornadoVariable::RigRateMultiplier,
        TornadoVariable::WorkoverWaitDays,
        TornadoVariable::DeclineRate,
        TornadoVariable::HyperbolicExponent,
        TornadoVariable::WaterBreakthroughYear,
        TornadoVariable::WaterGrowthRate,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TornadoVariable::CapexMultiplier => "Capex multiplier",
            TornadoVariable::WorkoverFailureRate => "Workover failure rate",
            TornadoVariable::RigRateMultiplier => "Rig rate multiplier",
            TornadoVariable::WorkoverWaitDays => "Workover wait days",
            TornadoVariable::DeclineRate => "Decline rate",
            TornadoVariable::HyperbolicExponent => "Hyperbolic exponent",
            TornadoVariable::WaterBreakthroughYear => "Water breakthrough year",
            TornadoVariable::WaterGrowthRate => "Water growth rate",
        }
    }

    /// Default `(low, high)` bounds
    #[must_use]
    pub fn default_bounds(&self) -> (f64, f64) {
        match self {
            TornadoVariable::CapexMultiplier => (0.8, 1.2),
            TornadoVariable::WorkoverFailureRate => (0.05, 0.30),
            TornadoVariable::RigRateMultiplier => (0.7, 1.5),
            TornadoVariable::WorkoverWaitDays => (10.0, 90.0),
            TornadoVariable::DeclineRate => (0.08, 0.18),
            TornadoVariable::HyperbolicExponent => (0.0, 1.0),
            TornadoVariable::WaterBreakthroughYear => (4.0, 12.0),
            TornadoVariable::WaterGrowthRate => (0.2, 0.6),
        }
    }

    /// Copy of `base` with this variable set to `value`
    #[must_use]
    pub fn apply(&self, base: &ProjectParameters, value: f64) -> ProjectParameters {
        match self {
            TornadoVariable::CapexMultiplier => base.with_capex_multiplier(value),
            TornadoVariable::WorkoverFailureRate => base.with_workover_failure_rate(value),
            TornadoVariable::RigRateMultiplier => base.with_rig_rate_multiplier(value),
            TornadoVariable::WorkoverWaitDays => base.with_workover_wait_days(value),
            TornadoVariable::DeclineRate => base.with_decline_rate(value),
            TornadoVariable::HyperbolicExponent => base.with_hyperbolic_exponent(value),
            TornadoVariable::WaterBreakthroughYear => base.with_water_breakthrough_year(value),
            TornadoVariable::WaterGrowthRate => base.with_water_growth_rate(value),
        }
    }
}

/// Low and high value of one tornado variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TornadoRange {
    pub variable: TornadoVariable,
    pub low: f64,
    pub high: f64,
}

impl From<TornadoVariable> for TornadoRange {
    fn from(variable: TornadoVariable) -> Self {
        let (low, high) = variable.default_bounds();
        Self {
            variable,
            low,
            high,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TornadoConfig {
    pub ranges: Vec<TornadoRange>,
}

impl Default for TornadoConfig {
    fn default() -> Self {
        Self {
            ranges: TornadoVariable::ALL.iter().map(|v| (*v).into()).collect(),
        }
    }
}

/// Half-widths of the uniform Monte Carlo draws around the base case.
///
/// `*_pct` fields are relative (0.2 = ±20%); `*_years` fields are absolute.
/// Capex concentration and capex peak year are always drawn over their full
/// domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerturbationRanges {
    pub capex_pct: f64,
    pub peak_rate_pct: f64,
    pub opex_margin_pct: f64,
    pub fixed_opex_pct: f64,
    pub variable_opex_pct: f64,
    pub ramp_up_years: u32,
    pub plateau_years: u32,
    pub decline_years: u32,
}

impl Default for PerturbationRanges {
    fn default() -> Self {
        Self {
            capex_pct: 0.20,
            peak_rate_pct: 0.15,
            opex_margin_pct: 0.25,
            fixed_opex_pct: 0.20,
            variable_opex_pct: 0.20,
            ramp_up_years: 1,
            plateau_years: 2,
            decline_years: 2,
        }
    }
}

/// Configuration for Monte Carlo sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub samples: usize,
    /// Fixed seed for reproducible runs; `None` draws from OS entropy and
    /// results differ between runs
    pub seed: Option<u64>,
    pub ranges: PerturbationRanges,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            seed: None,
            ranges: PerturbationRanges::default(),
        }
    }
}

impl MonteCarloConfig {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }
}

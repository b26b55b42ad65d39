//! One-at-a-time tornado analysis of NPV.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ProjectParameters;
use crate::error::Result;
use crate::evaluate::evaluate_metrics;

use super::{TornadoConfig, TornadoVariable};

/// Whether NPV rises or falls as the variable moves from low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwingDirection {
    Positive,
    Negative,
}

/// NPV at the low and high bound of one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityScenario {
    pub variable: TornadoVariable,
    pub low_value: f64,
    pub high_value: f64,
    pub npv_low: f64,
    pub npv_high: f64,
    /// `|npv_high - npv_low|`
    pub swing: f64,
    pub direction: SwingDirection,
}

impl SensitivityScenario {
    fn new(variable: TornadoVariable, low_value: f64, high_value: f64, npv_low: f64, npv_high: f64) -> Self {
        Self {
            variable,
            low_value,
            high_value,
            npv_low,
            npv_high,
            swing: (npv_high - npv_low).abs(),
            direction: if npv_high >= npv_low {
                SwingDirection::Positive
            } else {
                SwingDirection::Negative
            },
        }
    }
}

fn variant_npv(base: &ProjectParameters, variable: TornadoVariable, value: f64) -> Result<f64> {
    let (metrics, _) = evaluate_metrics(&variable.apply(base, value))?;
    Ok(metrics.npv)
}

/// Evaluate every range at both bounds and rank by swing, largest first.
///
/// Each bound runs the full pipeline on its own copy of `base`.
pub fn run_tornado(base: &ProjectParameters, config: &TornadoConfig) -> Result<Vec<SensitivityScenario>> {
    let jobs: Vec<(TornadoVariable, f64)> = config
        .ranges
        .iter()
        .flat_map(|r| [(r.variable, r.low), (r.variable, r.high)])
        .collect();

    #[cfg(feature = "parallel")]
    let npvs: Result<Vec<f64>> = jobs
        .into_par_iter()
        .map(|(variable, value)| variant_npv(base, variable, value))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let npvs: Result<Vec<f64>> = jobs
        .into_iter()
        .map(|(variable, value)| variant_npv(base, variable, value))
        .collect();

    let npvs = npvs?;
    let mut scenarios: Vec<SensitivityScenario> = config
        .ranges
        .iter()
        .zip(npvs.chunks_exact(2))
        .map(|(range, pair)| SensitivityScenario::new(range.variable, range.low, range.high, pair[0], pair[1]))
        .collect();

    scenarios.sort_by(|a, b| b.swing.total_cmp(&a.swing));

    if let Some(top) = scenarios.first() {
        tracing::info!(
            variables = scenarios.len(),
            top = top.variable.label(),
            swing = top.swing,
            "tornado analysis complete"
        );
    }
    Ok(scenarios)
}

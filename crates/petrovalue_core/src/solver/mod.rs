//! Single-variable root finding
//!
//! Roots are found in two stages: a grid scan locates the first interval
//! with a sign change, then bisection narrows it. Used for IRR (rate at
//! which NPV is zero) and the breakeven price (price scale at which NPV is
//! zero).
//!
//! # Example
//!
//! ```ignore
//! use petrovalue_core::solver::{SolverConfig, find_root, linear_grid};
//!
//! let grid = linear_grid(0.0, 5.0, 500);
//! let result = find_root(&grid, |r| Ok::<_, Infallible>(npv(&flows, r)), &SolverConfig::default())?;
//! ```

mod bisection;
mod result;

use serde::{Deserialize, Serialize};

pub use bisection::{bisect, brackets_root, scan_bracket};
pub use result::{ConvergenceHistory, RootResult, SolverStep, TerminationReason};

/// Stopping rules for bisection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Stop once the bracket is narrower than this
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 200,
        }
    }
}

/// `steps + 1` evenly spaced points from `start` to `end` inclusive
#[must_use]
pub fn linear_grid(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps == 0 {
        return vec![start];
    }
    let step = (end - start) / steps as f64;
    (0..=steps).map(|i| start + step * i as f64).collect()
}

/// Scan `grid` for the first sign change of `f`, then bisect it
pub fn find_root<E>(
    grid: &[f64],
    mut f: impl FnMut(f64) -> Result<f64, E>,
    config: &SolverConfig,
) -> Result<RootResult, E> {
    let mut history = ConvergenceHistory::new();
    match scan_bracket(grid, &mut f, &mut history)? {
        Some((low, high)) => bisect(low, high, &mut f, config, history),
        None => Ok(RootResult::no_bracket(history)),
    }
}

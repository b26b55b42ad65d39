//! Bracketed bisection for single-variable roots
//!
//! Bisection is slow but cannot diverge: once a sign change is bracketed
//! the root stays inside the bracket. The objective may fail (e.g. a
//! pipeline re-run), in which case the error is propagated unchanged.

use super::SolverConfig;
use super::result::{ConvergenceHistory, RootResult, TerminationReason};

/// Whether `a` and `b` straddle zero (either may be exactly zero)
#[must_use]
pub fn brackets_root(a: f64, b: f64) -> bool {
    a.is_finite() && b.is_finite() && (a == 0.0 || b == 0.0 || a.signum() != b.signum())
}

/// Find the first adjacent pair of `grid` points whose values straddle zero.
///
/// The grid is walked in order, so the bracket found is the one nearest to
/// `grid[0]` in the direction of travel.
pub fn scan_bracket<E>(
    grid: &[f64],
    f: &mut impl FnMut(f64) -> Result<f64, E>,
    history: &mut ConvergenceHistory,
) -> Result<Option<(f64, f64)>, E> {
    let Some((&first, rest)) = grid.split_first() else {
        return Ok(None);
    };
    let mut prev_x = first;
    let mut prev_value = f(prev_x)?;
    history.record(prev_x, prev_value);

    for &x in rest {
        let value = f(x)?;
        history.record(x, value);
        if brackets_root(prev_value, value) {
            return Ok(Some((prev_x, x)));
        }
        prev_x = x;
        prev_value = value;
    }
    Ok(None)
}

/// Bisect `[low, high]`, which must bracket a sign change of `f`
pub fn bisect<E>(
    low: f64,
    high: f64,
    f: &mut impl FnMut(f64) -> Result<f64, E>,
    config: &SolverConfig,
    mut history: ConvergenceHistory,
) -> Result<RootResult, E> {
    let mut low = low;
    let mut high = high;
    let mut f_low = f(low)?;
    history.record(low, f_low);

    if f_low == 0.0 {
        return Ok(RootResult {
            root: Some(low),
            termination_reason: TerminationReason::Converged,
            iterations: 0,
            history,
        });
    }

    let mut iteration = 0;
    while iteration < config.max_iterations && (high - low).abs() > config.tolerance {
        iteration += 1;
        let mid = f64::midpoint(low, high);
        let f_mid = f(mid)?;
        history.record(mid, f_mid);

        if f_mid == 0.0 {
            return Ok(RootResult {
                root: Some(mid),
                termination_reason: TerminationReason::Converged,
                iterations: iteration,
                history,
            });
        }

        if f_mid.signum() == f_low.signum() {
            low = mid;
            f_low = f_mid;
        } else {
            high = mid;
        }
        history.record_width((high - low).abs());
    }

    let converged = (high - low).abs() <= config.tolerance;
    Ok(RootResult {
        root: Some(f64::midpoint(low, high)),
        termination_reason: if converged {
            TerminationReason::Converged
        } else {
            TerminationReason::MaxIterationsReached
        },
        iterations: iteration,
        history,
    })
}

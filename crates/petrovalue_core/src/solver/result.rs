//! Root-finding result types
//!
//! Contains types for tracking solver progress and final results.

use serde::{Deserialize, Serialize};

/// A single function evaluation during a solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverStep {
    pub x: f64,
    pub value: f64,
}

/// History of evaluations during a solve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceHistory {
    /// All evaluations, in the order they were performed
    pub steps: Vec<SolverStep>,

    /// Width of the bracket after each bisection iteration
    pub bracket_widths: Vec<f64>,
}

impl ConvergenceHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, x: f64, value: f64) {
        self.steps.push(SolverStep { x, value });
    }

    pub fn record_width(&mut self, width: f64) {
        self.bracket_widths.push(width);
    }

    #[must_use]
    pub fn num_evaluations(&self) -> usize {
        self.steps.len()
    }
}

/// Reason why a solve terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Bracket narrowed below tolerance, or an exact root was hit
    Converged,

    /// Maximum iterations reached before the bracket was narrow enough
    MaxIterationsReached,

    /// No sign change was found on the search grid
    NoBracket,
}

/// Final result of a root solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootResult {
    /// Midpoint of the final bracket; `None` when no bracket was found
    pub root: Option<f64>,

    pub termination_reason: TerminationReason,

    /// Number of bisection iterations performed
    pub iterations: usize,

    pub history: ConvergenceHistory,
}

impl RootResult {
    #[must_use]
    pub fn no_bracket(history: ConvergenceHistory) -> Self {
        Self {
            root: None,
            termination_reason: TerminationReason::NoBracket,
            iterations: 0,
            history,
        }
    }

    #[must_use]
    pub fn converged(&self) -> bool {
        self.termination_reason == TerminationReason::Converged
    }
}

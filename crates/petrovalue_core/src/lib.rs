//! Oil & gas project economics engine
//!
//! This crate evaluates an offshore field development from a single
//! parameter snapshot. It supports:
//! - Production profiles with ramp-up, plateau and Arps decline, a logistic
//!   water cut and facility liquid-handling limits
//! - Constant, preset and custom oil price curves with quality adjustment
//! - Capex phasing, tax incentives, chartered platforms and depreciation
//!   (straight-line and units-of-production)
//! - Simple or detailed opex, including workover campaigns and downtime
//! - Concession, production sharing and transfer-of-rights fiscal regimes
//! - NPV, IRR, payback, breakeven price and NPV / investment
//! - Tornado and Monte Carlo sensitivity analysis
//!
//! # Example
//!
//! ```ignore
//! use petrovalue_core::{ProjectParameters, RunOptions, evaluate, run};
//!
//! let params = ProjectParameters::default().with_capex_multiplier(1.1);
//! let evaluation = evaluate(&params)?;
//! println!("NPV: {:.0} MMUSD", evaluation.metrics.npv);
//!
//! let results = run(&params, &RunOptions::default());
//! ```
//!
//! All money is in MMUSD (nominal), oil volumes in MMbbl, gas in MMscf.

#![warn(clippy::all)]

// ============================================================================
// Pipeline stages
// ============================================================================

pub mod capex;
pub mod cash_flow;
pub mod fiscal;
pub mod opex;
pub mod price;
pub mod production;

// ============================================================================
// Evaluation and analysis
// ============================================================================

pub mod analysis;
pub mod error;
pub mod evaluate;
pub mod metrics;
pub mod solver;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{FiscalRegime, ProjectParameters};
pub use error::{ConfigError, EngineError};
pub use evaluate::{RunOptions, evaluate, run};
pub use model::{Evaluation, Metrics, Payback, Results, Warning, YearlyRecord};

//! Sensitivity analysis
//!
//! Two analyses run on top of a base `ProjectParameters`, each as a map of
//! independent pipeline runs over parameter copies followed by a reduce:
//!
//! - **Tornado**: every variable is evaluated at its low and high bound with
//!   all other inputs at base, and ranked by NPV swing.
//! - **Monte Carlo**: a fixed set of inputs is drawn uniformly around the
//!   base case; the samples are summarized by the NPV distribution and the
//!   correlation of IRR spread with NPV / investment.
//!
//! ```ignore
//! use petrovalue_core::analysis::{MonteCarloConfig, TornadoConfig, run_monte_carlo, run_tornado};
//!
//! let tornado = run_tornado(&params, &TornadoConfig::default())?;
//! let mc = run_monte_carlo(&params, &MonteCarloConfig::seeded(42))?;
//! println!("top driver: {}", tornado[0].variable.label());
//! ```
//!
//! With the default `parallel` feature, runs fan out over rayon's pool.

mod config;
mod monte_carlo;
mod stats;
mod tornado;

pub use config::*;
pub use monte_carlo::{MonteCarloSample, MonteCarloSummary, SampledInputs, run_monte_carlo, sample_inputs};
pub use stats::{Distribution, TrendLine, linear_fit, pearson, percentile};
pub use tornado::{SensitivityScenario, SwingDirection, run_tornado};

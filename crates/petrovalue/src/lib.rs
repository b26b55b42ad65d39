//! Command-line driver for the petrovalue economics engine
//!
//! Loads a parameter file, runs the evaluation with the requested
//! sensitivity analyses and renders the results as text or JSON.

pub mod logging;
pub mod params;
pub mod report;

pub use logging::init_logging;
pub use params::{ParamsError, load_parameters};
pub use report::{text_summary, to_json};

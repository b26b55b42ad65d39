//! Integration tests for the petrovalue evaluation engine
//!
//! Tests are organized by topic:
//! - `end_to_end` - Default-case pipeline run and record invariants
//! - `production` - Profile invariants under varied subsurface inputs
//! - `fiscal` - Regime behavior through the full pipeline
//! - `metrics` - Payback, NPV profile and breakeven properties
//! - `sensitivity` - Tornado ranking and Monte Carlo sampling

mod fiscal;
mod production;
mod sensitivity;

//! Commodity price curves
//!
//! Builds the per-year oil price series (USD/bbl) for a project. The API
//! quality adjustment and the `price_scale` multiplier are applied to every
//! year, after the scenario shape.

use crate::config::defaults::{
    API_PREMIUM_PER_DEGREE, API_REFERENCE, BEAR_MULTIPLIERS, BULL_MULTIPLIERS,
};
use crate::config::{PriceParams, PriceScenario};

/// Decay constant of the custom curve's post-peak segment: the gap to the
/// long-term price shrinks to `e^-3` (~5%) by the final project year.
const POST_PEAK_DECAY: f64 = 3.0;

/// Multiplicative quality factor: +0.4% of price per API degree above 30°
#[must_use]
pub fn api_adjustment(api_gravity: f64) -> f64 {
    1.0 + API_PREMIUM_PER_DEGREE * (api_gravity - API_REFERENCE)
}

fn preset_multiplier(table: &[f64], year: u32) -> f64 {
    let idx = (year as usize).min(table.len() - 1);
    table[idx]
}

/// Unadjusted scenario price for a given year
fn scenario_price(params: &PriceParams, year: u32, duration_years: u32) -> f64 {
    match params.scenario {
        PriceScenario::Constant => params.initial_price,
        PriceScenario::Bull => params.initial_price * preset_multiplier(&BULL_MULTIPLIERS, year),
        PriceScenario::Bear => params.initial_price * preset_multiplier(&BEAR_MULTIPLIERS, year),
        PriceScenario::Custom => custom_price(params, year, duration_years),
    }
}

fn custom_price(params: &PriceParams, year: u32, duration_years: u32) -> f64 {
    let peak_year = params.peak_year;
    if year <= peak_year {
        if peak_year == 0 {
            return params.peak_price;
        }
        let frac = f64::from(year) / f64::from(peak_year);
        return params.initial_price + (params.peak_price - params.initial_price) * frac;
    }

    // Horizon of the decay segment; a peak at or past the project end still
    // decays over at least one year.
    let span = f64::from(duration_years.saturating_sub(peak_year).max(1));
    let elapsed = f64::from(year - peak_year);
    params.long_term_price
        + (params.peak_price - params.long_term_price) * (-POST_PEAK_DECAY * elapsed / span).exp()
}

/// Oil price per project year `0..=duration_years`
#[must_use]
pub fn price_curve(params: &PriceParams, api_gravity: f64, duration_years: u32) -> Vec<f64> {
    let adjustment = api_adjustment(api_gravity) * params.price_scale;
    (0..=duration_years)
        .map(|year| (scenario_price(params, year, duration_years) * adjustment).max(0.0))
        .collect()
}

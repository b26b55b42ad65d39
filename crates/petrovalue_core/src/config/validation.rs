//! Input validation for `ProjectParameters`.
//!
//! Rejects non-finite and out-of-domain inputs before any computation runs.
//! Conditions with a sound fallback (zero facility capacity, `b = 0`) are
//! not errors here; the models handle them locally.

use crate::error::ConfigError;

use super::defaults::{MAX_DURATION_YEARS, MAX_PHASE_YEARS};
use super::{CapexCategory, DepreciationMethod, ProjectParameters};

type ValidationResult = Result<(), ConfigError>;

fn finite(field: &str, value: f64) -> ValidationResult {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::new(field, format!("must be finite, got {value}")))
    }
}

fn non_negative(field: &str, value: f64) -> ValidationResult {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::new(field, format!("must be >= 0, got {value}")));
    }
    Ok(())
}

fn fraction(field: &str, value: f64) -> ValidationResult {
    finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::new(
            field,
            format!("must be between 0 and 1, got {value}"),
        ));
    }
    Ok(())
}

/// Validate a parameter set
pub fn validate(params: &ProjectParameters) -> Result<(), ConfigError> {
    validate_economics(params)?;
    validate_production(params)?;
    validate_price(params)?;
    validate_capex(params)?;
    validate_opex(params)?;
    validate_fiscal(params)?;
    validate_decommissioning(params)?;
    Ok(())
}

fn validate_economics(params: &ProjectParameters) -> ValidationResult {
    let e = &params.economics;
    finite("economics.discount_rate", e.discount_rate)?;
    if e.discount_rate <= -1.0 {
        return Err(ConfigError::new(
            "economics.discount_rate",
            "must be greater than -100%",
        ));
    }
    finite("economics.inflation_rate", e.inflation_rate)?;
    if e.inflation_rate <= -1.0 {
        return Err(ConfigError::new(
            "economics.inflation_rate",
            "must be greater than -100%",
        ));
    }
    if e.duration_years == 0 {
        return Err(ConfigError::new(
            "economics.duration_years",
            "must be at least 1 year",
        ));
    }
    if e.duration_years > MAX_DURATION_YEARS {
        return Err(ConfigError::new(
            "economics.duration_years",
            format!("cannot exceed {MAX_DURATION_YEARS} years"),
        ));
    }
    if e.first_oil_year > e.duration_years {
        return Err(ConfigError::new(
            "economics.first_oil_year",
            "must fall within the project duration",
        ));
    }
    Ok(())
}

fn validate_production(params: &ProjectParameters) -> ValidationResult {
    let p = &params.production;
    for (field, years) in [
        ("production.ramp_up_years", p.ramp_up_years),
        ("production.plateau_years", p.plateau_years),
        ("production.decline_years", p.decline_years),
    ] {
        if years > MAX_PHASE_YEARS {
            return Err(ConfigError::new(
                field,
                format!("cannot exceed {MAX_PHASE_YEARS} years, got {years}"),
            ));
        }
    }
    non_negative("production.peak_rate_bpd", p.peak_rate_bpd)?;
    non_negative("production.decline_rate.base", p.decline_rate.base_value())?;
    fraction(
        "production.decline_rate.technology_factor",
        p.decline_rate.technology_factor(),
    )?;
    non_negative("production.hyperbolic_exponent", p.hyperbolic_exponent)?;
    finite("production.api_gravity", p.api_gravity)?;
    non_negative("production.gas_oil_ratio", p.gas_oil_ratio)?;
    fraction("production.water_cut.max", p.water_cut.max)?;
    non_negative("production.water_cut.growth_rate", p.water_cut.growth_rate)?;
    finite(
        "production.water_cut.breakthrough_year",
        p.water_cut.breakthrough_year,
    )?;
    non_negative("production.liquid_capacity_bpd", p.liquid_capacity_bpd)?;
    finite("production.reserves_mmbbl", p.reserves_mmbbl)?;
    if p.peak_rate_bpd > 0.0 && p.reserves_mmbbl <= 0.0 {
        return Err(ConfigError::new(
            "production.reserves_mmbbl",
            "must be > 0 when peak production is positive",
        ));
    }
    Ok(())
}

fn validate_price(params: &ProjectParameters) -> ValidationResult {
    let p = &params.price;
    non_negative("price.initial_price", p.initial_price)?;
    non_negative("price.peak_price", p.peak_price)?;
    non_negative("price.long_term_price", p.long_term_price)?;
    non_negative("price.price_scale", p.price_scale)?;
    non_negative("price.gas_price", p.gas_price)?;
    fraction("price.gas_sales_fraction", p.gas_sales_fraction)?;
    Ok(())
}

fn validate_capex(params: &ProjectParameters) -> ValidationResult {
    let c = &params.capex;
    non_negative("capex.total", c.total)?;
    fraction("capex.concentration", c.concentration)?;
    non_negative("capex.charter_premium", c.charter_premium)?;
    if c.duration_years == 0 {
        return Err(ConfigError::new(
            "capex.duration_years",
            "must be at least 1 year",
        ));
    }
    if c.duration_years > params.economics.duration_years + 1 {
        return Err(ConfigError::new(
            "capex.duration_years",
            "capex window cannot extend beyond the project duration",
        ));
    }
    if c.peak_year >= c.duration_years {
        return Err(ConfigError::new(
            "capex.peak_year",
            "must fall within the capex window",
        ));
    }

    let mut total_share = 0.0;
    for category in CapexCategory::ALL {
        let cat = c.category(category);
        let name = category.label().to_lowercase();
        fraction(&format!("capex.{name}.share"), cat.share)?;
        fraction(&format!("capex.{name}.incentive_ratio"), cat.incentive_ratio)?;
        fraction(
            &format!("capex.{name}.indirect_tax_rate"),
            cat.indirect_tax_rate,
        )?;
        match cat.depreciation {
            DepreciationMethod::Linear { years } | DepreciationMethod::Accelerated { years }
                if years == 0 =>
            {
                return Err(ConfigError::new(
                    format!("capex.{name}.depreciation"),
                    "depreciation life must be at least 1 year",
                ));
            }
            _ => {}
        }
        total_share += cat.share;
    }
    if (total_share - 1.0).abs() > 1e-6 {
        return Err(ConfigError::new(
            "capex",
            format!("category shares must sum to 1, got {total_share}"),
        ));
    }
    Ok(())
}

fn validate_opex(params: &ProjectParameters) -> ValidationResult {
    let o = &params.opex;
    fraction("opex.margin", o.margin)?;
    non_negative("opex.fixed_annual", o.fixed_annual)?;
    non_negative("opex.variable_per_bbl", o.variable_per_bbl)?;
    non_negative("opex.workover.failure_rate", o.workover.failure_rate)?;
    non_negative(
        "opex.workover.rig_rate_multiplier",
        o.workover.rig_rate_multiplier,
    )?;
    non_negative("opex.workover.wait_days", o.workover.wait_days)?;
    Ok(())
}

fn validate_fiscal(params: &ProjectParameters) -> ValidationResult {
    let f = &params.fiscal;
    fraction("fiscal.royalty_rate", f.royalty_rate)?;
    fraction("fiscal.cost_oil_cap", f.cost_oil_cap)?;
    fraction("fiscal.profit_oil_gov_share", f.profit_oil_gov_share)?;
    fraction("fiscal.corporate_tax_rate", f.corporate_tax_rate)?;
    fraction("fiscal.loss_carryforward_cap", f.loss_carryforward_cap)?;

    let mut previous = f64::NEG_INFINITY;
    for bracket in &f.special_participation {
        non_negative("fiscal.special_participation.threshold", bracket.threshold)?;
        fraction("fiscal.special_participation.rate", bracket.rate)?;
        if bracket.threshold <= previous {
            return Err(ConfigError::new(
                "fiscal.special_participation",
                "thresholds must be strictly increasing",
            ));
        }
        previous = bracket.threshold;
    }
    Ok(())
}

fn validate_decommissioning(params: &ProjectParameters) -> ValidationResult {
    let d = &params.decommissioning;
    non_negative("decommissioning.cost_fraction", d.cost_fraction)?;
    if d.years > params.economics.duration_years {
        return Err(ConfigError::new(
            "decommissioning.years",
            "cannot exceed the project duration",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&ProjectParameters::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_duration() {
        let mut params = ProjectParameters::default();
        params.economics.duration_years = 0;
        let err = validate(&params).unwrap_err();
        assert_eq!(err.field, "economics.duration_years");
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        let mut params = ProjectParameters::default();
        params.economics.discount_rate = f64::NAN;
        assert!(validate(&params).is_err());
    }

    #[test]
    fn test_rejects_missing_reserves_with_production() {
        let mut params = ProjectParameters::default();
        params.production.reserves_mmbbl = 0.0;
        let err = validate(&params).unwrap_err();
        assert_eq!(err.field, "production.reserves_mmbbl");

        params.production.peak_rate_bpd = 0.0;
        assert!(validate(&params).is_ok());
    }

    #[test]
    fn test_zero_capacity_is_not_an_error() {
        let mut params = ProjectParameters::default();
        params.production.liquid_capacity_bpd = 0.0;
        assert!(validate(&params).is_ok());

        params.production.liquid_capacity_bpd = -1.0;
        assert!(validate(&params).is_err());
    }

    #[test]
    fn test_rejects_oversized_production_phases() {
        let mut params = ProjectParameters::default();
        params.production.plateau_years = u32::MAX - 1;
        let err = validate(&params).unwrap_err();
        assert_eq!(err.field, "production.plateau_years");

        params.production.plateau_years = MAX_PHASE_YEARS;
        assert!(validate(&params).is_ok());
    }

    #[test]
    fn test_rejects_bad_category_split() {
        let mut params = ProjectParameters::default();
        params.capex.wells.share = 0.5;
        let err = validate(&params).unwrap_err();
        assert_eq!(err.field, "capex");
    }

    #[test]
    fn test_rejects_peak_outside_capex_window() {
        let mut params = ProjectParameters::default();
        params.capex.peak_year = params.capex.duration_years;
        assert!(validate(&params).is_err());
    }
}

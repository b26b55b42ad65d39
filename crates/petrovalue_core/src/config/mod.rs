//! Project configuration
//!
//! The main configuration type is `ProjectParameters`, which contains every
//! assumption needed to evaluate a development project. Every field has a
//! default (see [`defaults`]), so a partial parameter file deserializes into
//! a complete parameter set.
//!
//! # Conceptual Organization
//!
//! **Subsurface** (what the reservoir delivers):
//! - `production` - rates, decline, water cut, facility capacity, reserves
//!
//! **Market and state** (scenarios you might compare):
//! - `price` - oil and gas price curve
//! - `fiscal` - tax regime and rates
//! - `economics` - discount rate, inflation, project horizon
//!
//! **Development plan** (what you spend):
//! - `capex` - capital spend profile, incentives, depreciation
//! - `opex` - operating cost model
//! - `decommissioning` - abandonment cost and timing
//!
//! # Variants
//!
//! Parameters are never edited in place by the engine. Sensitivity analysis
//! builds variants through the `with_*` helpers, each returning a new value:
//!
//! ```ignore
//! let high_capex = base.with_capex_multiplier(1.2);
//! let high = evaluate(&high_capex)?;
//! ```

use serde::{Deserialize, Serialize};

mod decline;
pub mod defaults;
mod validation;

pub use decline::DeclineRate;
pub use validation::validate;

// ============================================================================
// Economics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicParams {
    pub discount_rate: f64,
    /// Last project year index; records cover years `0..=duration_years`
    pub duration_years: u32,
    pub inflation_rate: f64,
    /// Project year in which production starts
    pub first_oil_year: u32,
    /// Calendar year of project year 0 (labels only)
    pub start_calendar_year: i32,
}

impl Default for EconomicParams {
    fn default() -> Self {
        Self {
            discount_rate: defaults::DISCOUNT_RATE,
            duration_years: defaults::DURATION_YEARS,
            inflation_rate: defaults::INFLATION_RATE,
            first_oil_year: defaults::FIRST_OIL_YEAR,
            start_calendar_year: defaults::START_CALENDAR_YEAR,
        }
    }
}

// ============================================================================
// Production
// ============================================================================

/// Logistic water-cut (BSW) curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterCutParams {
    /// Asymptotic water cut (BSWmax)
    pub max: f64,
    /// Logistic growth rate `k`
    pub growth_rate: f64,
    /// Inflection point, in years after first oil
    pub breakthrough_year: f64,
}

impl Default for WaterCutParams {
    fn default() -> Self {
        Self {
            max: defaults::WATER_CUT_MAX,
            growth_rate: defaults::WATER_GROWTH_RATE,
            breakthrough_year: defaults::WATER_BREAKTHROUGH_YEAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionParams {
    pub peak_rate_bpd: f64,
    pub ramp_up_years: u32,
    pub plateau_years: u32,
    pub decline_years: u32,
    pub decline_rate: DeclineRate,
    /// Arps `b`; 0 is exponential decline
    pub hyperbolic_exponent: f64,
    pub api_gravity: f64,
    /// Scf of associated gas per barrel of oil
    pub gas_oil_ratio: f64,
    pub water_cut: WaterCutParams,
    /// Facility liquid-handling capacity (oil + water)
    pub liquid_capacity_bpd: f64,
    /// Recoverable reserves in MMbbl
    pub reserves_mmbbl: f64,
}

impl Default for ProductionParams {
    fn default() -> Self {
        Self {
            peak_rate_bpd: defaults::PEAK_RATE_BPD,
            ramp_up_years: defaults::RAMP_UP_YEARS,
            plateau_years: defaults::PLATEAU_YEARS,
            decline_years: defaults::DECLINE_YEARS,
            decline_rate: DeclineRate::default(),
            hyperbolic_exponent: defaults::HYPERBOLIC_EXPONENT,
            api_gravity: defaults::API_GRAVITY,
            gas_oil_ratio: defaults::GAS_OIL_RATIO,
            water_cut: WaterCutParams::default(),
            liquid_capacity_bpd: defaults::LIQUID_CAPACITY_BPD,
            reserves_mmbbl: defaults::RESERVES_MMBBL,
        }
    }
}

// ============================================================================
// Price
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceScenario {
    /// Flat at the initial price
    Constant,
    /// Preset rising curve
    Bull,
    /// Preset falling curve
    Bear,
    /// Initial → peak → long-term curve
    #[default]
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceParams {
    pub scenario: PriceScenario,
    /// USD/bbl at year 0
    pub initial_price: f64,
    pub peak_price: f64,
    pub peak_year: u32,
    pub long_term_price: f64,
    /// Multiplier applied to the whole oil price curve
    pub price_scale: f64,
    /// USD/Mcf
    pub gas_price: f64,
    pub gas_sales_fraction: f64,
}

impl Default for PriceParams {
    fn default() -> Self {
        Self {
            scenario: PriceScenario::default(),
            initial_price: defaults::INITIAL_PRICE,
            peak_price: defaults::PEAK_PRICE,
            peak_year: defaults::PRICE_PEAK_YEAR,
            long_term_price: defaults::LONG_TERM_PRICE,
            price_scale: defaults::PRICE_SCALE,
            gas_price: defaults::GAS_PRICE,
            gas_sales_fraction: defaults::GAS_SALES_FRACTION,
        }
    }
}

// ============================================================================
// Capex
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapexCategory {
    Platform,
    Wells,
    Subsea,
}

impl CapexCategory {
    pub const ALL: [CapexCategory; 3] = [
        CapexCategory::Platform,
        CapexCategory::Wells,
        CapexCategory::Subsea,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CapexCategory::Platform => "Platform",
            CapexCategory::Wells => "Wells",
            CapexCategory::Subsea => "Subsea",
        }
    }
}

/// Tagged by `method` so YAML reads `{ method: Linear, years: 10 }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum DepreciationMethod {
    Linear { years: u32 },
    /// Same as linear over a materially shorter life
    Accelerated { years: u32 },
    UnitsOfProduction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ownership {
    #[default]
    Owned,
    /// Platform is chartered: no platform capex, annual charter cost instead
    Chartered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapexCategoryParams {
    /// Share of total capex
    pub share: f64,
    /// Fraction of indirect taxes relieved by the incentive regime (Repetro)
    pub incentive_ratio: f64,
    /// Indirect tax rate on the uncovered part
    pub indirect_tax_rate: f64,
    pub depreciation: DepreciationMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapexParams {
    /// Total base capex in MMUSD
    pub total: f64,
    pub duration_years: u32,
    /// Index within the capex window where spend peaks
    pub peak_year: u32,
    /// 0 = flat allocation, 1 = fully triangular around `peak_year`
    pub concentration: f64,
    pub platform: CapexCategoryParams,
    pub wells: CapexCategoryParams,
    pub subsea: CapexCategoryParams,
    pub ownership: Ownership,
    /// Markup of the charter contract over the platform's base cost
    pub charter_premium: f64,
}

impl Default for CapexParams {
    fn default() -> Self {
        Self {
            total: defaults::TOTAL_CAPEX,
            duration_years: defaults::CAPEX_DURATION_YEARS,
            peak_year: defaults::CAPEX_PEAK_YEAR,
            concentration: defaults::CAPEX_CONCENTRATION,
            platform: CapexCategoryParams {
                share: defaults::PLATFORM_SHARE,
                incentive_ratio: defaults::PLATFORM_INCENTIVE,
                indirect_tax_rate: defaults::INDIRECT_TAX_RATE,
                depreciation: DepreciationMethod::Linear {
                    years: defaults::LINEAR_DEPRECIATION_YEARS,
                },
            },
            wells: CapexCategoryParams {
                share: defaults::WELLS_SHARE,
                incentive_ratio: defaults::WELLS_INCENTIVE,
                indirect_tax_rate: defaults::INDIRECT_TAX_RATE,
                depreciation: DepreciationMethod::UnitsOfProduction,
            },
            subsea: CapexCategoryParams {
                share: defaults::SUBSEA_SHARE,
                incentive_ratio: defaults::SUBSEA_INCENTIVE,
                indirect_tax_rate: defaults::INDIRECT_TAX_RATE,
                depreciation: DepreciationMethod::Accelerated {
                    years: defaults::ACCELERATED_DEPRECIATION_YEARS,
                },
            },
            ownership: Ownership::default(),
            charter_premium: defaults::CHARTER_PREMIUM,
        }
    }
}

impl CapexParams {
    #[must_use]
    pub fn category(&self, category: CapexCategory) -> &CapexCategoryParams {
        match category {
            CapexCategory::Platform => &self.platform,
            CapexCategory::Wells => &self.wells,
            CapexCategory::Subsea => &self.subsea,
        }
    }
}

// ============================================================================
// Opex
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpexMode {
    /// Opex as a fraction of revenue
    Simple,
    /// Fixed + variable + workover
    #[default]
    Detailed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WellType {
    #[default]
    PreSalt,
    PostSalt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionComplexity {
    #[default]
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoverParams {
    pub well_count: u32,
    /// Interventions per well per year (λ)
    pub failure_rate: f64,
    pub well_type: WellType,
    pub completion: CompletionComplexity,
    pub rig_rate_multiplier: f64,
    /// Days a failed well waits for a rig before the intervention starts
    pub wait_days: f64,
}

impl Default for WorkoverParams {
    fn default() -> Self {
        Self {
            well_count: defaults::WELL_COUNT,
            failure_rate: defaults::WORKOVER_FAILURE_RATE,
            well_type: WellType::default(),
            completion: CompletionComplexity::default(),
            rig_rate_multiplier: defaults::RIG_RATE_MULTIPLIER,
            wait_days: defaults::WORKOVER_WAIT_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpexParams {
    pub mode: OpexMode,
    /// Simple mode: opex as a fraction of gross revenue
    pub margin: f64,
    /// Detailed mode: MMUSD per producing year, before inflation
    pub fixed_annual: f64,
    /// Detailed mode: USD per barrel of oil
    pub variable_per_bbl: f64,
    pub workover: WorkoverParams,
}

impl Default for OpexParams {
    fn default() -> Self {
        Self {
            mode: OpexMode::default(),
            margin: defaults::OPEX_MARGIN,
            fixed_annual: defaults::FIXED_OPEX,
            variable_per_bbl: defaults::VARIABLE_OPEX,
            workover: WorkoverParams::default(),
        }
    }
}

// ============================================================================
// Fiscal
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiscalRegime {
    /// Royalties + special participation + corporate tax
    Concession,
    /// Royalties + cost oil / profit oil split + corporate tax
    #[default]
    Sharing,
    /// Transfer of rights: royalties + corporate tax
    CessionOnerosa,
}

/// One marginal bracket of the special participation table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecialParticipationBracket {
    /// Quarterly net revenue (MMUSD) above which `rate` applies
    pub threshold: f64,
    pub rate: f64,
}

fn default_special_participation() -> Vec<SpecialParticipationBracket> {
    defaults::SPECIAL_PARTICIPATION_BRACKETS
        .iter()
        .map(|&(threshold, rate)| SpecialParticipationBracket { threshold, rate })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiscalParams {
    pub regime: FiscalRegime,
    pub royalty_rate: f64,
    pub special_participation: Vec<SpecialParticipationBracket>,
    /// Maximum share of revenue recoverable as cost oil
    pub cost_oil_cap: f64,
    pub profit_oil_gov_share: f64,
    pub corporate_tax_rate: f64,
    /// Maximum share of positive taxable income that loss carryforward may offset
    pub loss_carryforward_cap: f64,
}

impl Default for FiscalParams {
    fn default() -> Self {
        Self {
            regime: FiscalRegime::default(),
            royalty_rate: defaults::ROYALTY_RATE,
            special_participation: default_special_participation(),
            cost_oil_cap: defaults::COST_OIL_CAP,
            profit_oil_gov_share: defaults::PROFIT_OIL_GOV_SHARE,
            corporate_tax_rate: defaults::CORPORATE_TAX_RATE,
            loss_carryforward_cap: defaults::LOSS_CARRYFORWARD_CAP,
        }
    }
}

// ============================================================================
// Decommissioning
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecommissioningProfile {
    /// Equal spend in each terminal year
    #[default]
    Lump,
    /// Linearly increasing spend towards the final year
    Ramped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecommissioningParams {
    /// Cost as a fraction of total base capex
    pub cost_fraction: f64,
    /// Number of terminal years carrying decommissioning spend
    pub years: u32,
    pub profile: DecommissioningProfile,
}

impl Default for DecommissioningParams {
    fn default() -> Self {
        Self {
            cost_fraction: defaults::DECOMMISSIONING_FRACTION,
            years: defaults::DECOMMISSIONING_YEARS,
            profile: DecommissioningProfile::default(),
        }
    }
}

// ============================================================================
// Project
// ============================================================================

/// Complete project configuration
///
/// This is the snapshot passed to the evaluation engine. It is consumed by
/// reference and never modified; every evaluation of the same value yields
/// the same result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectParameters {
    pub economics: EconomicParams,
    pub production: ProductionParams,
    pub price: PriceParams,
    pub capex: CapexParams,
    pub opex: OpexParams,
    pub fiscal: FiscalParams,
    pub decommissioning: DecommissioningParams,
}

impl ProjectParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of yearly records an evaluation produces
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.economics.duration_years as usize + 1
    }

    /// First project year carrying decommissioning spend
    #[must_use]
    pub fn decommissioning_start_year(&self) -> u32 {
        (self.economics.duration_years + 1).saturating_sub(self.decommissioning.years)
    }

    // === Variants ===

    #[must_use]
    pub fn with_price_scale(&self, scale: f64) -> Self {
        let mut params = self.clone();
        params.price.price_scale = scale;
        params
    }

    #[must_use]
    pub fn with_capex_multiplier(&self, multiplier: f64) -> Self {
        let mut params = self.clone();
        params.capex.total = self.capex.total * multiplier;
        params
    }

    #[must_use]
    pub fn with_workover_failure_rate(&self, rate: f64) -> Self {
        let mut params = self.clone();
        params.opex.workover.failure_rate = rate;
        params
    }

    #[must_use]
    pub fn with_rig_rate_multiplier(&self, multiplier: f64) -> Self {
        let mut params = self.clone();
        params.opex.workover.rig_rate_multiplier = multiplier;
        params
    }

    #[must_use]
    pub fn with_workover_wait_days(&self, days: f64) -> Self {
        let mut params = self.clone();
        params.opex.workover.wait_days = days;
        params
    }

    /// Replace the base decline rate; the effective rate is re-derived
    #[must_use]
    pub fn with_decline_rate(&self, base_rate: f64) -> Self {
        let mut params = self.clone();
        params.production.decline_rate = self.production.decline_rate.with_base(base_rate);
        params
    }

    #[must_use]
    pub fn with_decline_technology(&self, technology_factor: f64) -> Self {
        let mut params = self.clone();
        params.production.decline_rate = self
            .production
            .decline_rate
            .with_technology_factor(technology_factor);
        params
    }

    #[must_use]
    pub fn with_hyperbolic_exponent(&self, b: f64) -> Self {
        let mut params = self.clone();
        params.production.hyperbolic_exponent = b;
        params
    }

    #[must_use]
    pub fn with_water_breakthrough_year(&self, year: f64) -> Self {
        let mut params = self.clone();
        params.production.water_cut.breakthrough_year = year;
        params
    }

    #[must_use]
    pub fn with_water_growth_rate(&self, k: f64) -> Self {
        let mut params = self.clone();
        params.production.water_cut.growth_rate = k;
        params
    }

    #[must_use]
    pub fn with_regime(&self, regime: FiscalRegime) -> Self {
        let mut params = self.clone();
        params.fiscal.regime = regime;
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ProjectParameters::default();
        assert_eq!(params.record_count(), 31);
        assert_eq!(params.fiscal.regime, FiscalRegime::Sharing);
        assert_eq!(params.production.peak_rate_bpd, 180_000.0);
        assert_eq!(params.decommissioning_start_year(), 30);
        let split: f64 = CapexCategory::ALL
            .iter()
            .map(|c| params.capex.category(*c).share)
            .sum();
        assert!((split - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"economics":{"discount_rate":0.08},"fiscal":{"regime":"Concession"}}"#;
        let params: ProjectParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.economics.discount_rate, 0.08);
        assert_eq!(params.economics.duration_years, defaults::DURATION_YEARS);
        assert_eq!(params.fiscal.regime, FiscalRegime::Concession);
        assert_eq!(params.fiscal.special_participation.len(), 5);
        assert_eq!(params.production, ProductionParams::default());
    }

    #[test]
    fn test_variants_leave_base_untouched() {
        let base = ProjectParameters::default();
        let snapshot = base.clone();

        let variant = base.with_capex_multiplier(1.2).with_decline_rate(0.2);
        assert_eq!(base, snapshot);
        assert!((variant.capex.total - base.capex.total * 1.2).abs() < 1e-9);
        assert!((variant.production.decline_rate.derived_value() - 0.2).abs() < 1e-12);
    }
}

//! Default values for every project parameter.
//!
//! Money is in millions of USD (MMUSD), rates in barrels per day (bpd),
//! annual volumes in millions of barrels (MMbbl).

// === Economics ===
pub const DISCOUNT_RATE: f64 = 0.10;
pub const DURATION_YEARS: u32 = 30;
pub const INFLATION_RATE: f64 = 0.02;
pub const FIRST_OIL_YEAR: u32 = 4;
pub const START_CALENDAR_YEAR: i32 = 2025;
pub const MAX_DURATION_YEARS: u32 = 200;

// === Production ===
pub const PEAK_RATE_BPD: f64 = 180_000.0;
pub const RAMP_UP_YEARS: u32 = 3;
pub const PLATEAU_YEARS: u32 = 4;
pub const DECLINE_YEARS: u32 = 19;
pub const DECLINE_RATE: f64 = 0.12;
pub const DECLINE_TECHNOLOGY_FACTOR: f64 = 0.0;
pub const HYPERBOLIC_EXPONENT: f64 = 0.5;
pub const API_GRAVITY: f64 = 28.0;
/// Scf of associated gas per barrel of oil
pub const GAS_OIL_RATIO: f64 = 800.0;
pub const WATER_CUT_MAX: f64 = 0.90;
pub const WATER_GROWTH_RATE: f64 = 0.30;
/// Years after first oil at which the water-cut curve inflects
pub const WATER_BREAKTHROUGH_YEAR: f64 = 8.0;
pub const LIQUID_CAPACITY_BPD: f64 = 350_000.0;
pub const RESERVES_MMBBL: f64 = 1_000.0;
/// Upper bound on the length of each of ramp-up, plateau and decline
pub const MAX_PHASE_YEARS: u32 = MAX_DURATION_YEARS;

/// Hyperbolic exponents below this use the exponential decline branch
pub const EXPONENTIAL_B_THRESHOLD: f64 = 1e-6;
pub const DAYS_PER_YEAR: f64 = 365.0;

// === Price ===
pub const INITIAL_PRICE: f64 = 80.0;
pub const PEAK_PRICE: f64 = 95.0;
pub const PRICE_PEAK_YEAR: u32 = 5;
pub const LONG_TERM_PRICE: f64 = 70.0;
pub const PRICE_SCALE: f64 = 1.0;
/// USD per Mcf
pub const GAS_PRICE: f64 = 2.0;
/// Fraction of associated gas that is sold rather than reinjected or flared
pub const GAS_SALES_FRACTION: f64 = 0.5;

pub const API_REFERENCE: f64 = 30.0;
pub const API_PREMIUM_PER_DEGREE: f64 = 0.004;

pub const BULL_MULTIPLIERS: [f64; 10] = [1.00, 1.05, 1.10, 1.15, 1.20, 1.24, 1.28, 1.30, 1.30, 1.30];
pub const BEAR_MULTIPLIERS: [f64; 10] = [1.00, 0.94, 0.88, 0.83, 0.79, 0.76, 0.74, 0.72, 0.71, 0.70];

// === Capex ===
pub const TOTAL_CAPEX: f64 = 7_000.0;
pub const CAPEX_DURATION_YEARS: u32 = 5;
pub const CAPEX_PEAK_YEAR: u32 = 2;
pub const CAPEX_CONCENTRATION: f64 = 0.5;
pub const PLATFORM_SHARE: f64 = 0.45;
pub const WELLS_SHARE: f64 = 0.35;
pub const SUBSEA_SHARE: f64 = 0.20;
pub const PLATFORM_INCENTIVE: f64 = 0.80;
pub const WELLS_INCENTIVE: f64 = 0.60;
pub const SUBSEA_INCENTIVE: f64 = 0.70;
pub const INDIRECT_TAX_RATE: f64 = 0.35;
pub const LINEAR_DEPRECIATION_YEARS: u32 = 10;
pub const ACCELERATED_DEPRECIATION_YEARS: u32 = 5;
pub const CHARTER_PREMIUM: f64 = 0.15;

// === Opex ===
pub const OPEX_MARGIN: f64 = 0.30;
pub const FIXED_OPEX: f64 = 200.0;
/// USD per barrel of oil
pub const VARIABLE_OPEX: f64 = 8.0;
pub const WELL_COUNT: u32 = 16;
/// Interventions per well per year
pub const WORKOVER_FAILURE_RATE: f64 = 0.15;
pub const RIG_RATE_MULTIPLIER: f64 = 1.0;
pub const WORKOVER_WAIT_DAYS: f64 = 30.0;
pub const MAX_DOWNTIME_FRACTION: f64 = 0.95;

// === Fiscal ===
pub const ROYALTY_RATE: f64 = 0.15;
pub const COST_OIL_CAP: f64 = 0.50;
pub const PROFIT_OIL_GOV_SHARE: f64 = 0.40;
pub const CORPORATE_TAX_RATE: f64 = 0.34;
pub const LOSS_CARRYFORWARD_CAP: f64 = 0.30;
/// Special participation brackets: (quarterly net revenue threshold in MMUSD, marginal rate)
pub const SPECIAL_PARTICIPATION_BRACKETS: [(f64, f64); 5] = [
    (150.0, 0.10),
    (300.0, 0.20),
    (450.0, 0.30),
    (600.0, 0.35),
    (750.0, 0.40),
];

// === Decommissioning ===
pub const DECOMMISSIONING_FRACTION: f64 = 0.15;
pub const DECOMMISSIONING_YEARS: u32 = 1;

//! Per-year output records
//!
//! One `YearlyRecord` is produced for every project year `0..=duration`.
//! Money is in MMUSD, volumes in MMbbl (gas in MMscf).

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a record's lines sum to its free cash flow
pub const RECONCILIATION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: u32,
    pub calendar_year: i32,

    // === Volumes ===
    /// Average delivered oil rate over the year
    pub oil_rate_bpd: f64,
    pub oil_volume: f64,
    pub water_volume: f64,
    pub liquid_volume: f64,
    pub gas_volume: f64,
    pub water_cut: f64,

    // === Revenue ===
    pub oil_price: f64,
    pub revenue: f64,

    // === Investment ===
    /// Capex outlay including its indirect tax effect
    pub capex_outlay: f64,
    /// Indirect tax part of `capex_outlay`
    pub capex_tax: f64,
    pub depreciation: f64,

    // === Operating cost ===
    /// Total opex, including charter and workover
    pub opex: f64,
    pub charter_cost: f64,
    pub workover_cost: f64,

    // === Government take ===
    pub royalties: f64,
    pub special_participation: f64,
    pub cost_oil: f64,
    pub profit_oil_gov: f64,
    pub government_take: f64,
    pub taxable_income: f64,
    /// Loss pool remaining after this year's usage
    pub loss_carryforward: f64,
    pub corporate_tax: f64,

    // === Cash flow ===
    pub decommissioning_cost: f64,
    pub free_cash_flow: f64,
    pub discount_factor: f64,
    pub discounted_cash_flow: f64,
    pub cumulative_cash_flow: f64,
    pub cumulative_discounted_cash_flow: f64,
    pub is_decom_year: bool,
}

impl YearlyRecord {
    /// Signed sum of the component lines making up free cash flow
    #[must_use]
    pub fn component_sum(&self) -> f64 {
        (self.revenue - self.government_take)
            - self.opex
            - self.corporate_tax
            - self.capex_outlay
            - self.decommissioning_cost
    }

    /// Whether free cash flow equals the signed sum of its component lines
    #[must_use]
    pub fn reconciles(&self) -> bool {
        let scale = 1.0 + self.revenue.abs() + self.capex_outlay.abs();
        (self.free_cash_flow - self.component_sum()).abs() <= RECONCILIATION_TOLERANCE * scale
    }
}

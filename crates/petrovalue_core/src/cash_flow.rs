//! Cash flow assembly
//!
//! Combines production, price, capex, opex and fiscal schedules into one
//! `YearlyRecord` per project year, with decommissioning spend, discount
//! factors and cumulative sums.

use crate::capex::CapexSchedule;
use crate::config::{DecommissioningProfile, PriceParams, ProjectParameters};
use crate::fiscal::FiscalYear;
use crate::model::YearlyRecord;
use crate::opex::OpexYear;
use crate::production::ProductionProfile;

/// Mcf per MMscf divided by USD per MMUSD
const GAS_REVENUE_FACTOR: f64 = 1e-3;

/// `1 / (1 + rate)^year`
#[must_use]
pub fn discount_factor(rate: f64, year: usize) -> f64 {
    (1.0 + rate).powi(year as i32).recip()
}

/// Gross oil and gas revenue per year, MMUSD
#[must_use]
pub fn revenue_schedule(profile: &ProductionProfile, prices: &[f64], price: &PriceParams) -> Vec<f64> {
    profile
        .years
        .iter()
        .zip(prices)
        .map(|(year, oil_price)| {
            let oil = year.oil_volume * oil_price;
            let gas = year.gas_volume * price.gas_sales_fraction * price.gas_price * GAS_REVENUE_FACTOR;
            oil + gas
        })
        .collect()
}

/// Decommissioning spend per year.
///
/// The total is a fraction of base capex, placed in the final `years`
/// project years.
#[must_use]
pub fn decommissioning_schedule(params: &ProjectParameters) -> Vec<f64> {
    let records = params.record_count();
    let mut schedule = vec![0.0; records];
    let decom = &params.decommissioning;
    let n = decom.years as usize;
    if n == 0 {
        return schedule;
    }

    let total = params.capex.total * decom.cost_fraction;
    let start = params.decommissioning_start_year() as usize;
    let weights: Vec<f64> = match decom.profile {
        DecommissioningProfile::Lump => vec![1.0; n],
        DecommissioningProfile::Ramped => (1..=n).map(|w| w as f64).collect(),
    };
    let weight_sum: f64 = weights.iter().sum();

    for (slot, weight) in schedule.iter_mut().skip(start).zip(&weights) {
        *slot = total * weight / weight_sum;
    }
    schedule
}

/// Per-year inputs gathered from the upstream schedules
pub struct CashFlowInputs<'a> {
    pub production: &'a ProductionProfile,
    pub prices: &'a [f64],
    pub revenue: &'a [f64],
    pub capex: &'a CapexSchedule,
    pub opex: &'a [OpexYear],
    pub fiscal: &'a [FiscalYear],
    pub decommissioning: &'a [f64],
}

/// Assemble the yearly records
#[must_use]
pub fn assemble_records(params: &ProjectParameters, inputs: &CashFlowInputs<'_>) -> Vec<YearlyRecord> {
    let rate = params.economics.discount_rate;
    let decom_start = params.decommissioning_start_year() as usize;
    let start_calendar_year = params.economics.start_calendar_year;

    let mut cumulative = 0.0;
    let mut cumulative_discounted = 0.0;
    let mut records = Vec::with_capacity(params.record_count());

    for year in 0..params.record_count() {
        let production = &inputs.production.years[year];
        let opex = &inputs.opex[year];
        let fiscal = &inputs.fiscal[year];

        let mut record = YearlyRecord {
            year: year as u32,
            calendar_year: start_calendar_year + year as i32,
            oil_rate_bpd: production.oil_rate_bpd,
            oil_volume: production.oil_volume,
            water_volume: production.water_volume,
            liquid_volume: production.liquid_volume,
            gas_volume: production.gas_volume,
            water_cut: production.water_cut,
            oil_price: inputs.prices[year],
            revenue: inputs.revenue[year],
            capex_outlay: inputs.capex.outlay(year),
            capex_tax: inputs.capex.tax(year),
            depreciation: inputs.capex.depreciation(year),
            opex: opex.total,
            charter_cost: opex.charter,
            workover_cost: opex.workover,
            royalties: fiscal.royalties,
            special_participation: fiscal.special_participation,
            cost_oil: fiscal.cost_oil,
            profit_oil_gov: fiscal.profit_oil_gov,
            government_take: fiscal.government_take,
            taxable_income: fiscal.taxable_income,
            loss_carryforward: fiscal.loss_carryforward,
            corporate_tax: fiscal.corporate_tax,
            decommissioning_cost: inputs.decommissioning[year],
            is_decom_year: params.decommissioning.years > 0 && year >= decom_start,
            ..Default::default()
        };

        record.free_cash_flow = record.component_sum();
        record.discount_factor = discount_factor(rate, year);
        record.discounted_cash_flow = record.free_cash_flow * record.discount_factor;
        cumulative += record.free_cash_flow;
        cumulative_discounted += record.discounted_cash_flow;
        record.cumulative_cash_flow = cumulative;
        record.cumulative_discounted_cash_flow = cumulative_discounted;

        records.push(record);
    }
    records
}

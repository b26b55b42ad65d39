//! Fiscal regimes and government take
//!
//! Royalties are always charged first. The regime then adds either special
//! participation (concession), a cost oil / profit oil split (sharing) or
//! nothing further (cession onerosa). Corporate tax applies in every regime,
//! with a capped loss carryforward.

use crate::config::{FiscalParams, FiscalRegime, SpecialParticipationBracket};

/// Quarters per year; special participation is assessed quarterly
const QUARTERS: f64 = 4.0;

/// Pre-tax quantities of one year that the fiscal regime needs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FiscalBase {
    pub revenue: f64,
    pub opex: f64,
    pub depreciation: f64,
    /// Capex outlay incl. tax effect, recoverable as cost oil
    pub capex_outlay: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FiscalYear {
    pub royalties: f64,
    pub special_participation: f64,
    pub cost_oil: f64,
    pub profit_oil_gov: f64,
    /// Royalties + special participation + government profit oil
    pub government_take: f64,
    pub taxable_income: f64,
    /// Loss pool after this year's addition or usage
    pub loss_carryforward: f64,
    pub corporate_tax: f64,
}

/// Marginal progressive tax over `brackets`.
///
/// Each bracket's rate applies to the part of `base` above its threshold
/// and below the next bracket's threshold. Zero below the first threshold.
#[must_use]
pub fn progressive_tax(base: f64, brackets: &[SpecialParticipationBracket]) -> f64 {
    if base <= 0.0 || brackets.is_empty() {
        return 0.0;
    }

    let mut tax = 0.0;
    for (i, bracket) in brackets.iter().enumerate() {
        if base <= bracket.threshold {
            break;
        }
        let upper = brackets
            .get(i + 1)
            .map(|b| b.threshold)
            .unwrap_or(f64::INFINITY);
        tax += (base.min(upper) - bracket.threshold).max(0.0) * bracket.rate;
    }
    tax
}

/// Annual special participation, assessed on the quarterly net revenue base
#[must_use]
pub fn special_participation(
    net_revenue: f64,
    brackets: &[SpecialParticipationBracket],
) -> f64 {
    progressive_tax(net_revenue / QUARTERS, brackets) * QUARTERS
}

/// Running pool of tax losses available to offset future taxable income
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LossPool {
    balance: f64,
    /// Maximum share of positive taxable income that may be offset
    cap: f64,
}

impl LossPool {
    #[must_use]
    pub fn new(cap: f64) -> Self {
        Self { balance: 0.0, cap }
    }

    #[must_use]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Add a loss or consume the pool; returns income left to tax
    pub fn apply(&mut self, taxable_income: f64) -> f64 {
        if taxable_income <= 0.0 {
            self.balance += -taxable_income;
            return 0.0;
        }
        let used = self.balance.min(self.cap * taxable_income);
        self.balance -= used;
        taxable_income - used
    }
}

/// Government take and corporate tax for every project year
#[must_use]
pub fn fiscal_schedule(params: &FiscalParams, bases: &[FiscalBase]) -> Vec<FiscalYear> {
    let mut pool = LossPool::new(params.loss_carryforward_cap);

    bases
        .iter()
        .map(|base| {
            let royalties = base.revenue * params.royalty_rate;
            let mut year = FiscalYear {
                royalties,
                ..Default::default()
            };

            match params.regime {
                FiscalRegime::Concession => {
                    let net = base.revenue - royalties - base.opex - base.depreciation;
                    year.special_participation =
                        special_participation(net, &params.special_participation);
                }
                FiscalRegime::Sharing => {
                    let recoverable = base.opex + base.depreciation + base.capex_outlay;
                    year.cost_oil = (base.revenue * params.cost_oil_cap).min(recoverable).max(0.0);
                    let profit_oil = (base.revenue - royalties - year.cost_oil).max(0.0);
                    year.profit_oil_gov = profit_oil * params.profit_oil_gov_share;
                }
                FiscalRegime::CessionOnerosa => {}
            }

            year.government_take = year.royalties + year.special_participation + year.profit_oil_gov;
            year.taxable_income =
                base.revenue - year.government_take - base.opex - base.depreciation;
            let taxed = pool.apply(year.taxable_income);
            year.corporate_tax = taxed * params.corporate_tax_rate;
            year.loss_carryforward = pool.balance();
            year
        })
        .collect()
}

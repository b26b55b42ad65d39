//! Capital expenditure scheduling and depreciation
//!
//! Total base capex is spread over the capex window with a blend of a flat
//! and a triangular profile, split into categories, grossed up by the
//! indirect taxes left after incentives, and depreciated per category.

use crate::config::{CapexCategory, DepreciationMethod, Ownership, ProjectParameters};

/// Capex and depreciation of one category, per project year
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySchedule {
    pub category: CapexCategory,
    /// Base spend before indirect taxes
    pub base: Vec<f64>,
    /// Indirect tax effect after incentives
    pub tax: Vec<f64>,
    pub depreciation: Vec<f64>,
}

impl CategorySchedule {
    /// After-incentive outlay in `year` (base plus tax effect)
    #[must_use]
    pub fn outlay(&self, year: usize) -> f64 {
        self.base[year] + self.tax[year]
    }

    #[must_use]
    pub fn total_outlay(&self) -> f64 {
        self.base.iter().sum::<f64>() + self.tax.iter().sum::<f64>()
    }

    #[must_use]
    pub fn total_depreciation(&self) -> f64 {
        self.depreciation.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapexSchedule {
    pub categories: Vec<CategorySchedule>,
    /// Level charter payment per producing year (zero when owned)
    pub charter: Vec<f64>,
}

impl CapexSchedule {
    fn sum_over(&self, year: usize, f: impl Fn(&CategorySchedule, usize) -> f64) -> f64 {
        self.categories.iter().map(|c| f(c, year)).sum()
    }

    /// Outlay incl. tax effect across categories
    #[must_use]
    pub fn outlay(&self, year: usize) -> f64 {
        self.sum_over(year, |c, y| c.outlay(y))
    }

    #[must_use]
    pub fn tax(&self, year: usize) -> f64 {
        self.sum_over(year, |c, y| c.tax[y])
    }

    #[must_use]
    pub fn depreciation(&self, year: usize) -> f64 {
        self.sum_over(year, |c, y| c.depreciation[y])
    }
}

/// Fraction of total capex spent in each year of the capex window.
///
/// A flat `1/D` profile blended with triangular weights `D - |i - peak|`
/// by `concentration`, renormalized to sum to one.
#[must_use]
pub fn spend_shares(duration: u32, peak_year: u32, concentration: f64) -> Vec<f64> {
    if duration == 0 {
        return Vec::new();
    }
    let d = f64::from(duration);
    let c = concentration.clamp(0.0, 1.0);

    let triangle: Vec<f64> = (0..duration)
        .map(|i| d - f64::from(i.abs_diff(peak_year)))
        .map(|w| w.max(0.0))
        .collect();
    let triangle_sum: f64 = triangle.iter().sum();

    let blended: Vec<f64> = triangle
        .iter()
        .map(|w| {
            let tri = if triangle_sum > 0.0 { w / triangle_sum } else { 1.0 / d };
            (1.0 - c) / d + c * tri
        })
        .collect();

    let total: f64 = blended.iter().sum();
    blended.iter().map(|s| s / total).collect()
}

/// Straight-line depreciation of each vintage over `years`, starting at
/// `max(outlay year, first_oil)` and truncated at the project end
fn straight_line(outlays: &[f64], years: u32, first_oil: usize) -> Vec<f64> {
    let mut depreciation = vec![0.0; outlays.len()];
    let life = years.max(1) as usize;
    for (vintage, &amount) in outlays.iter().enumerate() {
        if amount <= 0.0 {
            continue;
        }
        let annual = amount / life as f64;
        let start = vintage.max(first_oil);
        for slot in depreciation.iter_mut().skip(start).take(life) {
            *slot += annual;
        }
    }
    depreciation
}

/// Units-of-production depreciation against a single undepreciated pool.
///
/// Year `t` charges `balance(t-1) * production(t) / remaining_reserves(t-1)`,
/// where the balance and remaining reserves are taken at the end of the
/// previous year. Year `t` outlays join the pool after the charge.
fn units_of_production(outlays: &[f64], production: &[f64], reserves: f64) -> Vec<f64> {
    let mut depreciation = vec![0.0; outlays.len()];
    let mut balance = 0.0;
    let mut remaining = reserves.max(0.0);

    for (year, slot) in depreciation.iter_mut().enumerate() {
        let produced = production.get(year).copied().unwrap_or(0.0);
        if balance > 0.0 && remaining > 0.0 && produced > 0.0 {
            let charge = (balance * produced / remaining).min(balance);
            *slot = charge;
            balance -= charge;
        }
        remaining = (remaining - produced).max(0.0);
        balance += outlays[year];
    }
    depreciation
}

/// Present value of one unit paid in each producing year
fn annuity_factor(production: &[f64], discount_rate: f64) -> f64 {
    production
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0.0)
        .map(|(year, _)| (1.0 + discount_rate).powi(year as i32).recip())
        .sum()
}

/// Level annual charter payment whose present value equals the platform's
/// base cost plus the charter premium
fn charter_payments(params: &ProjectParameters, production: &[f64]) -> Vec<f64> {
    let mut charter = vec![0.0; production.len()];
    if params.capex.ownership != Ownership::Chartered {
        return charter;
    }
    let platform_base = params.capex.total * params.capex.platform.share;
    let target = platform_base * (1.0 + params.capex.charter_premium);
    let factor = annuity_factor(production, params.economics.discount_rate);
    if factor <= 0.0 {
        tracing::warn!("chartered platform without production; no charter payments scheduled");
        return charter;
    }
    let payment = target / factor;
    for (slot, volume) in charter.iter_mut().zip(production) {
        if *volume > 0.0 {
            *slot = payment;
        }
    }
    charter
}

/// Build the capex, tax-effect, depreciation and charter schedule.
///
/// `production` is the oil volume per project year (MMbbl), used by
/// units-of-production depreciation and to place charter payments.
pub fn capex_schedule(params: &ProjectParameters, production: &[f64]) -> CapexSchedule {
    let capex = &params.capex;
    let records = params.record_count();
    let first_oil = params.economics.first_oil_year as usize;
    let shares = spend_shares(capex.duration_years, capex.peak_year, capex.concentration);

    let categories = CapexCategory::ALL
        .iter()
        .map(|&category| {
            let cat = capex.category(category);
            let chartered =
                category == CapexCategory::Platform && capex.ownership == Ownership::Chartered;
            let category_total = if chartered { 0.0 } else { capex.total * cat.share };
            let tax_rate = (1.0 - cat.incentive_ratio) * cat.indirect_tax_rate;

            let mut base = vec![0.0; records];
            for (slot, share) in base.iter_mut().zip(&shares) {
                *slot = category_total * share;
            }
            let tax: Vec<f64> = base.iter().map(|b| b * tax_rate).collect();
            let outlays: Vec<f64> = base.iter().zip(&tax).map(|(b, t)| b + t).collect();

            let depreciation = match cat.depreciation {
                DepreciationMethod::Linear { years } | DepreciationMethod::Accelerated { years } => {
                    straight_line(&outlays, years, first_oil)
                }
                DepreciationMethod::UnitsOfProduction => {
                    units_of_production(&outlays, production, params.production.reserves_mmbbl)
                }
            };

            CategorySchedule {
                category,
                base,
                tax,
                depreciation,
            }
        })
        .collect();

    CapexSchedule {
        categories,
        charter: charter_payments(params, production),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::production::production_profile;

    #[test]
    fn test_spend_shares_sum_to_one() {
        for c in [0.0, 0.3, 0.5, 1.0] {
            let shares = spend_shares(5, 2, c);
            assert_eq!(shares.len(), 5);
            let total: f64 = shares.iter().sum();
            assert!((total - 1.0).abs() < 1e-12, "c={c}: sum {total}");
        }
    }

    #[test]
    fn test_spend_shares_flat_and_peaked() {
        let flat = spend_shares(4, 1, 0.0);
        assert!(flat.iter().all(|s| (s - 0.25).abs() < 1e-12));

        let peaked = spend_shares(5, 2, 1.0);
        // weights 3,4,5,4,3 over 19
        assert!((peaked[2] - 5.0 / 19.0).abs() < 1e-12);
        assert!((peaked[0] - 3.0 / 19.0).abs() < 1e-12);
    }

    #[test]
    fn test_straight_line_starts_at_first_oil() {
        let dep = straight_line(&[100.0, 0.0, 0.0, 0.0, 0.0, 0.0], 2, 3);
        assert_eq!(dep, vec![0.0, 0.0, 0.0, 50.0, 50.0, 0.0]);
    }

    #[test]
    fn test_straight_line_truncates_at_project_end() {
        let dep = straight_line(&[0.0, 0.0, 90.0], 3, 0);
        assert_eq!(dep, vec![0.0, 0.0, 30.0]);
    }

    #[test]
    fn test_uop_uses_prior_balance() {
        let outlays = [100.0, 0.0, 0.0, 0.0];
        let production = [0.0, 10.0, 20.0, 10.0];
        let dep = units_of_production(&outlays, &production, 40.0);
        assert_eq!(dep[0], 0.0);
        assert!((dep[1] - 25.0).abs() < 1e-12);
        // balance 75 against 30 remaining, 20 produced
        assert!((dep[2] - 50.0).abs() < 1e-12);
        assert!((dep[3] - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_uop_zero_reserves_yields_zero() {
        let dep = units_of_production(&[100.0, 0.0], &[0.0, 10.0], 0.0);
        assert_eq!(dep, vec![0.0, 0.0]);
    }

    #[test]
    fn test_depreciation_never_exceeds_after_incentive_base() {
        let params = ProjectParameters::default();
        let profile = production_profile(&params, 0.0);
        let schedule = capex_schedule(&params, &profile.oil_volumes());
        for category in &schedule.categories {
            let base = category.total_outlay();
            let dep = category.total_depreciation();
            assert!(
                dep <= base + 1e-9,
                "{}: depreciation {dep} exceeds base {base}",
                category.category.label()
            );
        }
    }

    #[test]
    fn test_tax_effect_follows_incentive() {
        let params = ProjectParameters::default();
        let profile = production_profile(&params, 0.0);
        let schedule = capex_schedule(&params, &profile.oil_volumes());
        let platform = &schedule.categories[0];
        let base: f64 = platform.base.iter().sum();
        let tax: f64 = platform.tax.iter().sum();
        assert!((base - 7_000.0 * 0.45).abs() < 1e-6);
        assert!((tax - base * 0.2 * 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_chartered_platform_replaces_capex_with_payments() {
        let mut params = ProjectParameters::default();
        params.capex.ownership = Ownership::Chartered;
        let profile = production_profile(&params, 0.0);
        let volumes = profile.oil_volumes();
        let schedule = capex_schedule(&params, &volumes);

        assert_eq!(schedule.categories[0].total_outlay(), 0.0);
        let r = params.economics.discount_rate;
        let pv: f64 = schedule
            .charter
            .iter()
            .enumerate()
            .map(|(t, p)| p / (1.0 + r).powi(t as i32))
            .sum();
        let target = 7_000.0 * 0.45 * 1.15;
        assert!((pv - target).abs() < 1e-6, "charter PV {pv} vs {target}");
        for (payment, volume) in schedule.charter.iter().zip(&volumes) {
            assert_eq!(*payment > 0.0, *volume > 0.0);
        }
    }
}

//! Evaluation results
//!
//! Contains the output types of a single evaluation and of a full run
//! (evaluation plus sensitivity analyses).

use serde::{Deserialize, Serialize};

use crate::analysis::{MonteCarloSummary, SensitivityScenario};
use crate::error::EngineError;

use super::records::YearlyRecord;

/// Payback period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Payback {
    /// Fractional years from project year 0
    Years(f64),
    /// Cumulative cash flow never turns non-negative within the project
    NotReached,
}

impl Payback {
    #[must_use]
    pub fn years(&self) -> Option<f64> {
        match self {
            Payback::Years(y) => Some(*y),
            Payback::NotReached => None,
        }
    }

    /// Years, with `NotReached` ordered after every finite payback
    #[must_use]
    pub fn years_or_infinity(&self) -> f64 {
        self.years().unwrap_or(f64::INFINITY)
    }

    #[must_use]
    pub fn is_reached(&self) -> bool {
        matches!(self, Payback::Years(_))
    }
}

/// Oil price level at which NPV is zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakeven {
    /// Multiplier on the whole price curve
    pub price_scale: f64,
    /// `price_scale` applied to the year-0 price, USD/bbl
    pub price: f64,
}

/// Summary investment metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub discount_rate: f64,
    pub npv: f64,
    pub irr: Option<f64>,
    /// IRR minus the discount rate
    pub irr_spread: Option<f64>,
    /// NPV over the present value of capex outlays (incl. indirect taxes),
    /// both at the project discount rate
    pub npv_investment_ratio: Option<f64>,
    pub payback: Payback,
    pub discounted_payback: Payback,
    pub breakeven: Option<Breakeven>,
    /// Nominal capex outlays incl. indirect taxes
    pub total_capex: f64,
    pub pv_capex: f64,
    pub cumulative_oil: f64,
    pub total_revenue: f64,
    pub total_government_take: f64,
    pub total_corporate_tax: f64,
}

/// One point of the NPV-vs-discount-rate profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpvPoint {
    pub rate: f64,
    pub npv: f64,
}

/// Non-fatal conditions encountered during an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    /// Facility capacity is zero while peak production is positive
    ZeroCapacity,
    /// Reserves ran out before the production profile ended
    ReservesExhausted { year: u32 },
    /// IRR could not be computed
    IrrUnavailable { reason: String },
    /// Breakeven price could not be computed
    BreakevenUnavailable { reason: String },
    /// A sensitivity analysis failed; the base evaluation is still valid
    SensitivityUnavailable { analysis: String, reason: String },
}

/// Output of a single pipeline evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub records: Vec<YearlyRecord>,
    pub metrics: Metrics,
    pub npv_profile: Vec<NpvPoint>,
    pub warnings: Vec<Warning>,
}

impl Evaluation {
    /// Free cash flow series, year 0 first
    #[must_use]
    pub fn cash_flows(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.free_cash_flow).collect()
    }

    #[must_use]
    pub fn has_warning(&self, predicate: impl Fn(&Warning) -> bool) -> bool {
        self.warnings.iter().any(predicate)
    }
}

/// Everything the presentation layer consumes
///
/// Exactly one of `evaluation` and `error` is populated. A failed
/// sensitivity analysis leaves its output empty and adds a warning to the
/// evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Results {
    pub evaluation: Option<Evaluation>,
    pub tornado: Vec<SensitivityScenario>,
    pub monte_carlo: Option<MonteCarloSummary>,
    pub error: Option<EngineError>,
}

impl Results {
    #[must_use]
    pub fn failed(error: EngineError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub fn metrics(&self) -> Option<&Metrics> {
        self.evaluation.as_ref().map(|e| &e.metrics)
    }
}

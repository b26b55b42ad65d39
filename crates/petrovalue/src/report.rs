//! Plain-text and JSON rendering of run results

use std::fmt::Write;

use petrovalue_core::model::{Metrics, Payback};
use petrovalue_core::{Results, YearlyRecord};

/// Number of tornado variables shown in the text summary
pub const TORNADO_ROWS: usize = 5;

const CORRELATION_LABEL: &str = "Correlation of (IRR - rate) with NPV / investment:";

/// Serialize the full results as pretty-printed JSON
pub fn to_json(results: &Results) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v * 100.0))
}

fn payback(value: Payback) -> String {
    match value {
        Payback::Years(y) => format!("{y:.2} years"),
        Payback::NotReached => "not reached".to_string(),
    }
}

fn write_metrics(out: &mut String, m: &Metrics) -> std::fmt::Result {
    writeln!(out, "== Metrics (discount rate {:.1}%) ==", m.discount_rate * 100.0)?;
    writeln!(out, "  NPV                  {:>12.1} MMUSD", m.npv)?;
    writeln!(out, "  IRR                  {:>12}", percent(m.irr))?;
    writeln!(out, "  IRR spread           {:>12}", percent(m.irr_spread))?;
    match m.npv_investment_ratio {
        Some(ratio) => writeln!(out, "  NPV / investment     {:>12.3}", ratio)?,
        None => writeln!(out, "  NPV / investment     {:>12}", "n/a")?,
    }
    writeln!(out, "  Payback              {:>12}", payback(m.payback))?;
    writeln!(out, "  Discounted payback   {:>12}", payback(m.discounted_payback))?;
    match m.breakeven {
        Some(b) => writeln!(
            out,
            "  Breakeven price      {:>12.2} USD/bbl (x{:.3})",
            b.price, b.price_scale
        )?,
        None => writeln!(out, "  Breakeven price      {:>12}", "n/a")?,
    }
    writeln!(out, "  Capex (nominal)      {:>12.1} MMUSD", m.total_capex)?;
    writeln!(out, "  Cumulative oil       {:>12.1} MMbbl", m.cumulative_oil)?;
    writeln!(out, "  Revenue              {:>12.1} MMUSD", m.total_revenue)?;
    writeln!(out, "  Government take      {:>12.1} MMUSD", m.total_government_take)?;
    writeln!(out, "  Corporate tax        {:>12.1} MMUSD", m.total_corporate_tax)
}

fn write_records(out: &mut String, records: &[YearlyRecord]) -> std::fmt::Result {
    writeln!(out, "== Cash flow ==")?;
    writeln!(
        out,
        "{:>5} {:>10} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>10}",
        "Year", "Oil bpd", "Revenue", "Capex", "Opex", "Gov take", "Tax", "FCF", "Cum FCF"
    )?;
    for r in records {
        writeln!(
            out,
            "{:>5} {:>10.0} {:>9.1} {:>9.1} {:>9.1} {:>9.1} {:>9.1} {:>9.1} {:>10.1}",
            r.calendar_year,
            r.oil_rate_bpd,
            r.revenue,
            r.capex_outlay,
            r.opex + r.decommissioning_cost,
            r.government_take,
            r.corporate_tax,
            r.free_cash_flow,
            r.cumulative_cash_flow,
        )?;
    }
    Ok(())
}

fn write_sensitivity(out: &mut String, results: &Results) -> std::fmt::Result {
    if !results.tornado.is_empty() {
        writeln!(out, "== Tornado (NPV swing) ==")?;
        for s in results.tornado.iter().take(TORNADO_ROWS) {
            writeln!(
                out,
                "  {:<22} {:>10.1} .. {:>10.1}  swing {:>10.1}",
                s.variable.label(),
                s.npv_low,
                s.npv_high,
                s.swing
            )?;
        }
    }

    if let Some(mc) = &results.monte_carlo {
        writeln!(out, "== Monte Carlo ({} samples) ==", mc.samples.len())?;
        if let Some(npv) = &mc.npv {
            writeln!(
                out,
                "  NPV mean {:.1}  P10 {:.1}  P50 {:.1}  P90 {:.1}",
                npv.mean, npv.p10, npv.p50, npv.p90
            )?;
            writeln!(out, "  P(NPV > 0) {:.1}%", npv.probability_positive * 100.0)?;
        }
        match mc.correlation {
            Some(r) => writeln!(out, "  {CORRELATION_LABEL} {r:.3}")?,
            None => writeln!(out, "  {CORRELATION_LABEL} n/a")?,
        }
    }
    Ok(())
}

/// Render a human-readable summary of a successful or failed run
pub fn text_summary(results: &Results) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = render(&mut out, results);
    out
}

fn render(out: &mut String, results: &Results) -> std::fmt::Result {
    if let Some(error) = &results.error {
        return writeln!(out, "Evaluation failed: {error}");
    }
    let Some(evaluation) = &results.evaluation else {
        return Ok(());
    };

    write_metrics(out, &evaluation.metrics)?;
    for warning in &evaluation.warnings {
        writeln!(out, "  warning: {warning:?}")?;
    }
    write_sensitivity(out, results)?;
    write_records(out, &evaluation.records)
}

#[cfg(test)]
mod tests {
    use petrovalue_core::analysis::MonteCarloConfig;
    use petrovalue_core::error::ConfigError;
    use petrovalue_core::{EngineError, ProjectParameters, RunOptions, run};

    use super::*;

    #[test]
    fn test_summary_lists_metrics_and_years() {
        let params = ProjectParameters::default();
        let results = run(&params, &RunOptions::evaluation_only());
        let text = text_summary(&results);

        assert!(text.contains("NPV"));
        assert!(text.contains("Breakeven price"));
        assert!(!text.contains("Tornado"));
        let first = params.economics.start_calendar_year.to_string();
        assert!(text.contains(&first));
    }

    #[test]
    fn test_summary_names_correlated_metrics() {
        let options = RunOptions {
            tornado: None,
            monte_carlo: Some(MonteCarloConfig {
                samples: 20,
                ..MonteCarloConfig::seeded(3)
            }),
            ..Default::default()
        };
        let text = text_summary(&run(&ProjectParameters::default(), &options));
        assert!(text.contains("Monte Carlo (20 samples)"));
        assert!(text.contains("Correlation of (IRR - rate) with NPV / investment:"));
        assert!(!text.contains("NPV vs"));
    }

    #[test]
    fn test_summary_reports_error() {
        let results = Results::failed(EngineError::Configuration(ConfigError::new(
            "economics.discount_rate",
            "must be finite",
        )));
        let text = text_summary(&results);
        assert!(text.starts_with("Evaluation failed"));
        assert!(text.contains("economics.discount_rate"));
    }

    #[test]
    fn test_json_output_parses() {
        let results = run(&ProjectParameters::default(), &RunOptions::evaluation_only());
        let json = to_json(&results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["evaluation"]["metrics"]["npv"].is_number());
        assert!(value["error"].is_null());
    }
}

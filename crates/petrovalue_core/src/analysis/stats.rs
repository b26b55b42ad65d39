//! Summary statistics over sample sets.

use serde::{Deserialize, Serialize};

/// Least-squares line `y = slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Centered sums `(Sxy, Sxx, Syy)`
fn co_moments(xs: &[f64], ys: &[f64]) -> (f64, f64, f64) {
    let mx = mean(xs);
    let my = mean(ys);
    xs.iter()
        .zip(ys)
        .fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (x, y)| {
            let dx = x - mx;
            let dy = y - my;
            (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
        })
}

/// Pearson correlation; `None` with fewer than two pairs or zero variance
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let (sxy, sxx, syy) = co_moments(xs, ys);
    let denom = (sxx * syy).sqrt();
    (denom > 0.0).then(|| (sxy / denom).clamp(-1.0, 1.0))
}

#[must_use]
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<TrendLine> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let (sxy, sxx, _) = co_moments(xs, ys);
    if sxx <= 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some(TrendLine {
        slope,
        intercept: mean(ys) - slope * mean(xs),
    })
}

/// Linear-interpolated percentile of sorted data, `p` in `[0, 1]`
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let idx = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let w = idx - lo as f64;
    sorted[lo] * (1.0 - w) + sorted[hi] * w
}

/// Distribution summary of a sampled quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    /// Share of samples above zero
    pub probability_positive: f64,
}

impl Distribution {
    /// Summarize the finite values of `values`; `None` when there are none
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = mean(&sorted);
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p10: percentile(&sorted, 0.10),
            p50: percentile(&sorted, 0.50),
            p90: percentile(&sorted, 0.90),
            probability_positive: sorted.iter().filter(|v| **v > 0.0).count() as f64 / n,
        })
    }
}

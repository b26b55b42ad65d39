//! Nominal decline rate with a technology adjustment.
//!
//! The effective (derived) rate is always recomputed from the base rate, so
//! repeated edits of the technology factor never compound on each other.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Serialized form of [`DeclineRate`]: only the inputs, never the derived value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct DeclineRateInput {
    base: f64,
    technology_factor: f64,
}

impl Default for DeclineRateInput {
    fn default() -> Self {
        Self {
            base: defaults::DECLINE_RATE,
            technology_factor: defaults::DECLINE_TECHNOLOGY_FACTOR,
        }
    }
}

/// Annual nominal decline rate `Di`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "DeclineRateInput", into = "DeclineRateInput")]
pub struct DeclineRate {
    base_value: f64,
    technology_factor: f64,
    derived_value: f64,
}

impl DeclineRate {
    /// `technology_factor` is the fractional reduction of the base rate
    /// delivered by recovery technology (0.1 = 10% slower decline).
    #[must_use]
    pub fn new(base_value: f64, technology_factor: f64) -> Self {
        Self {
            base_value,
            technology_factor,
            derived_value: base_value * (1.0 - technology_factor),
        }
    }

    #[must_use]
    pub fn base_value(&self) -> f64 {
        self.base_value
    }

    #[must_use]
    pub fn technology_factor(&self) -> f64 {
        self.technology_factor
    }

    /// Effective rate used by the decline curve
    #[must_use]
    pub fn derived_value(&self) -> f64 {
        self.derived_value
    }

    #[must_use]
    pub fn with_base(&self, base_value: f64) -> Self {
        Self::new(base_value, self.technology_factor)
    }

    #[must_use]
    pub fn with_technology_factor(&self, technology_factor: f64) -> Self {
        Self::new(self.base_value, technology_factor)
    }
}

impl Default for DeclineRate {
    fn default() -> Self {
        Self::new(
            defaults::DECLINE_RATE,
            defaults::DECLINE_TECHNOLOGY_FACTOR,
        )
    }
}

impl From<DeclineRateInput> for DeclineRate {
    fn from(input: DeclineRateInput) -> Self {
        Self::new(input.base, input.technology_factor)
    }
}

impl From<DeclineRate> for DeclineRateInput {
    fn from(rate: DeclineRate) -> Self {
        Self {
            base: rate.base_value,
            technology_factor: rate.technology_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_from_base() {
        let rate = DeclineRate::new(0.12, 0.25);
        assert!((rate.derived_value() - 0.09).abs() < 1e-12);
        assert_eq!(rate.base_value(), 0.12);
    }

    #[test]
    fn test_repeated_technology_edits_do_not_compound() {
        let rate = DeclineRate::new(0.20, 0.0);
        let once = rate.with_technology_factor(0.5);
        let twice = once.with_technology_factor(0.5);
        assert_eq!(once, twice);
        assert!((twice.derived_value() - 0.10).abs() < 1e-12);

        let rebased = twice.with_base(0.10);
        assert!((rebased.derived_value() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_serde_ignores_derived_value() {
        let json = r#"{"base":0.1,"technology_factor":0.2}"#;
        let rate: DeclineRate = serde_json::from_str(json).unwrap();
        assert!((rate.derived_value() - 0.08).abs() < 1e-12);

        let out = serde_json::to_string(&rate).unwrap();
        assert!(!out.contains("derived"));
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// A parameter that failed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigError {
    /// Dotted path of the offending field (e.g. `production.peak_rate_bpd`)
    pub field: String,
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Quantity a root-finder was solving for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolvedQuantity {
    Irr,
    BreakevenPrice,
}

impl fmt::Display for SolvedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolvedQuantity::Irr => write!(f, "IRR"),
            SolvedQuantity::BreakevenPrice => write!(f, "breakeven price"),
        }
    }
}

/// Errors produced by the evaluation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineError {
    /// Non-finite or out-of-domain input
    Configuration(ConfigError),
    /// A root-finder could not bracket or converge on a root
    NumericalNonConvergence {
        quantity: SolvedQuantity,
        reason: String,
    },
    /// A computation hit a degenerate case with no sound fallback
    ArithmeticDegeneracy { context: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Configuration(e) => write!(f, "configuration error: {e}"),
            EngineError::NumericalNonConvergence { quantity, reason } => {
                write!(f, "{quantity} solver did not converge: {reason}")
            }
            EngineError::ArithmeticDegeneracy { context } => {
                write!(f, "arithmetic degeneracy in {context}")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Configuration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Configuration(e)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err: EngineError = ConfigError::new("economics.duration_years", "must be > 0").into();
        assert_eq!(
            err.to_string(),
            "configuration error: economics.duration_years: must be > 0"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_non_convergence_display() {
        let err = EngineError::NumericalNonConvergence {
            quantity: SolvedQuantity::Irr,
            reason: "no sign change".to_string(),
        };
        assert_eq!(err.to_string(), "IRR solver did not converge: no sign change");
    }
}

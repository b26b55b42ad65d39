//! Loading and printing project parameter files
//!
//! Parameter files are YAML (or JSON, chosen by the `.json` extension).
//! Every field is optional; missing fields take their defaults, so a file
//! only needs the assumptions that differ from the base case:
//!
//! ```yaml
//! economics:
//!   discount_rate: 0.08
//! fiscal:
//!   regime: Concession
//! capex:
//!   total: 9000
//! ```

use std::fs;
use std::path::Path;

use petrovalue_core::ProjectParameters;

/// Error types for parameter file operations
#[derive(Debug)]
pub enum ParamsError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsError::Io(msg) => write!(f, "IO error: {}", msg),
            ParamsError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ParamsError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ParamsError {}

/// Parse parameters from YAML
pub fn from_yaml(yaml: &str) -> Result<ProjectParameters, ParamsError> {
    serde_saphyr::from_str(yaml).map_err(|e| ParamsError::Parse(e.to_string()))
}

/// Render parameters as YAML
pub fn to_yaml(params: &ProjectParameters) -> Result<String, ParamsError> {
    serde_saphyr::to_string(params).map_err(|e| ParamsError::Serialize(e.to_string()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load parameters from a file, or the defaults when `path` is `None`
pub fn load_parameters(path: Option<&Path>) -> Result<ProjectParameters, ParamsError> {
    let Some(path) = path else {
        tracing::info!("no parameter file given; using defaults");
        return Ok(ProjectParameters::default());
    };

    let content = fs::read_to_string(path)
        .map_err(|e| ParamsError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let params = if is_json(path) {
        serde_json::from_str(&content).map_err(|e| ParamsError::Parse(e.to_string()))?
    } else {
        from_yaml(&content)?
    };
    tracing::info!(path = %path.display(), "loaded parameters");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use petrovalue_core::config::{DepreciationMethod, FiscalRegime, Ownership};
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "economics:\n  discount_rate: 0.08\nfiscal:\n  regime: Concession\n";
        let params = from_yaml(yaml).unwrap();
        assert_eq!(params.economics.discount_rate, 0.08);
        assert_eq!(params.fiscal.regime, FiscalRegime::Concession);
        assert_eq!(params.production, ProjectParameters::default().production);
    }

    #[test]
    fn test_defaults_survive_yaml() {
        let mut params = ProjectParameters::default();
        params.capex.ownership = Ownership::Chartered;
        let yaml = to_yaml(&params).unwrap();
        let parsed = from_yaml(&yaml).unwrap();
        assert_eq!(parsed, params);
        assert!(matches!(
            parsed.capex.wells.depreciation,
            DepreciationMethod::UnitsOfProduction
        ));
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "capex:\n  total: 9000\nproduction:\n  peak_rate_bpd: 150000").unwrap();

        let params = load_parameters(Some(file.path())).unwrap();
        assert_eq!(params.capex.total, 9_000.0);
        assert_eq!(params.production.peak_rate_bpd, 150_000.0);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, r#"{{"price": {{"scenario": "Bear"}}}}"#).unwrap();

        let params = load_parameters(Some(file.path())).unwrap();
        assert_eq!(params.price.scenario, petrovalue_core::config::PriceScenario::Bear);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_parameters(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(matches!(err, ParamsError::Io(_)));
    }

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(load_parameters(None).unwrap(), ProjectParameters::default());
    }
}

//! Parser for fixcheck.toml configuration files.
//!
//! fixcheck.toml carries the process-wide defaults the workspace builder
//! reads at construction time. Example:
//!
//! ```toml
//! suppressed_findings = ["syntax-error"]
//! default_references = ["java.base"]
//! ```
//!
//! There is deliberately no ambient global state: callers construct one
//! config per test (or load one once) and hand it to the builder.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Process-wide verifier defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HarnessConfig {
    /// Compiler finding ids dropped before any comparison.
    #[serde(default)]
    pub suppressed_findings: Vec<String>,

    /// Reference names every project may use without another project of
    /// that name existing in the workspace.
    #[serde(default)]
    pub default_references: Vec<String>,
}

impl HarnessConfig {
    /// Parse a fixcheck.toml file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HarnessConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse fixcheck.toml content.
    pub fn parse(content: &str) -> Result<Self, HarnessConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn is_suppressed(&self, finding_id: &str) -> bool {
        self.suppressed_findings.iter().any(|id| id == finding_id)
    }

    pub fn is_default_reference(&self, reference: &str) -> bool {
        self.default_references.iter().any(|name| name == reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = HarnessConfig::parse("").unwrap();
        assert!(config.suppressed_findings.is_empty());
        assert!(config.default_references.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
suppressed_findings = ["syntax-error", "unused"]
default_references = ["java.base"]
"#;
        let config = HarnessConfig::parse(toml).unwrap();
        assert!(config.is_suppressed("syntax-error"));
        assert!(config.is_suppressed("unused"));
        assert!(!config.is_suppressed("underscore-name"));
        assert!(config.is_default_reference("java.base"));
        assert!(!config.is_default_reference("app"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(HarnessConfig::parse("suppressed_findings = 3").is_err());
    }
}

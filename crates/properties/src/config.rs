//! Walker configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How nested properties are named and how deep they may go.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct WalkerConfig {
    /// Joins a nested property's name onto its parent's
    pub nested_separator: String,

    /// Maximum number of nested bean levels below the task
    pub max_nesting_depth: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            nested_separator: ".".to_string(),
            max_nesting_depth: 32,
        }
    }
}

impl WalkerConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed TOML or invalid values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| Error::configuration(format!("Invalid walker configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values make sense.
    ///
    /// # Errors
    ///
    /// Rejects an empty separator and a zero depth limit.
    pub fn validate(&self) -> Result<()> {
        if self.nested_separator.is_empty() {
            return Err(Error::configuration("nestedSeparator must not be empty"));
        }
        if self.max_nesting_depth == 0 {
            return Err(Error::configuration("maxNestingDepth must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WalkerConfig::default();
        assert_eq!(config.nested_separator, ".");
        assert_eq!(config.max_nesting_depth, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = WalkerConfig::from_toml_str("maxNestingDepth = 4").unwrap();
        assert_eq!(config.max_nesting_depth, 4);
        assert_eq!(config.nested_separator, ".");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(WalkerConfig::from_toml_str("").unwrap(), WalkerConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = WalkerConfig::from_toml_str("nestedSeparator = \"\"").unwrap_err();
        assert!(err.to_string().contains("nestedSeparator"));

        let err = WalkerConfig::from_toml_str("maxNestingDepth = 0").unwrap_err();
        assert!(err.to_string().contains("maxNestingDepth"));

        let err = WalkerConfig::from_toml_str("maxNestingDepth = \"deep\"").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}

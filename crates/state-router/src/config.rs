// File: src/config.rs
// Purpose: Router configuration parsing from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Router configuration
///
/// Attached to nodes through `RouteOptions::with_config`. The root node's
/// configuration governs `encode` and `decode`.
///
/// ```toml
/// strict_scopes = true
/// search_params = true
///
/// [intents]
/// legacy_json_payload = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Reject child scopes that collide with a parent param name (default: true)
    #[serde(default = "default_true")]
    pub strict_scopes: bool,

    /// Encode and decode `_searchParams` as a query string (default: true)
    #[serde(default = "default_true")]
    pub search_params: bool,

    #[serde(default)]
    pub intents: IntentsConfig,
}

/// Intent link configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentsConfig {
    /// Accept bare JSON payload segments written by older links (default: true)
    #[serde(default = "default_true")]
    pub legacy_json_payload: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strict_scopes: true,
            search_params: true,
            intents: IntentsConfig::default(),
        }
    }
}

impl Default for IntentsConfig {
    fn default() -> Self {
        Self {
            legacy_json_payload: true,
        }
    }
}

impl RouterConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read router config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse router config file: {:?}", path))
    }

    /// Parse configuration from TOML text; blank input yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: RouterConfig = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert!(config.strict_scopes);
        assert!(config.search_params);
        assert!(config.intents.legacy_json_payload);
    }

    #[test]
    fn test_blank_toml_is_default() {
        let config = RouterConfig::from_toml_str("  \n").unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RouterConfig::from_toml_str(
            r#"
search_params = false

[intents]
legacy_json_payload = false
"#,
        )
        .unwrap();

        assert!(config.strict_scopes);
        assert!(!config.search_params);
        assert!(!config.intents.legacy_json_payload);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(RouterConfig::from_toml_str("strict_scopes = \"yes\"").is_err());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = RouterConfig::load("definitely/not/here/router.toml").unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "state-router-config-{}.toml",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "strict_scopes = false").unwrap();
        drop(file);

        let config = RouterConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(!config.strict_scopes);
        assert!(config.search_params);
    }
}

//! CLI configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use priceflow_data::ApiConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_NAMES: [&str; 3] = ["priceflow.toml", ".priceflow.toml", "priceflow.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend settings.
    #[serde(default)]
    pub api: ApiSection,

    /// Local state settings.
    #[serde(default)]
    pub storage: StorageSection,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Backend connection settings, with the environment taking precedence.
    pub fn api_config(&self) -> Result<ApiConfig> {
        let mut config = ApiConfig::resolve(self.api.base_url.as_deref())
            .context("Invalid backend URL")?;
        if let Some(secs) = self.api.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Where the session state file lives.
    pub fn state_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(|| data_dir().join("priceflow").join("state.json"))
    }
}

/// Backend settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    /// Backend base URL. `PRICEFLOW_BACKEND_URL` overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Local state settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSection {
    /// Session state file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}

/// Generate a default priceflow.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# PriceFlow CLI configuration

[api]
# Overridden by the PRICEFLOW_BACKEND_URL environment variable
base_url = "{base_url}"
# timeout_secs = 30

[storage]
# path = "~/.local/share/priceflow/state.json"
"#,
        base_url = priceflow_data::DEFAULT_BASE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let config = CliConfig::parse(
            "priceflow.toml",
            r#"
            [api]
            base_url = "https://shop.example.com/api/v1"
            timeout_secs = 10

            [storage]
            path = "/tmp/pf/state.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url.as_deref(), Some("https://shop.example.com/api/v1"));
        assert_eq!(config.api.timeout_secs, Some(10));
        assert_eq!(config.state_path(), PathBuf::from("/tmp/pf/state.json"));
    }

    #[test]
    fn test_parse_json_and_defaults() {
        let config = CliConfig::parse("priceflow.json", r#"{"api": {}}"#).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.state_path().ends_with("priceflow/state.json"));
    }

    #[test]
    fn test_default_config_parses() {
        let config = CliConfig::parse("priceflow.toml", &generate_default_config()).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some(priceflow_data::DEFAULT_BASE_URL));
        assert_eq!(config.api.timeout_secs, None);
    }

    #[test]
    fn test_timeout_applied() {
        let config = CliConfig {
            api: ApiSection {
                base_url: None,
                timeout_secs: Some(5),
            },
            storage: StorageSection::default(),
        };
        assert_eq!(config.api_config().unwrap().timeout, Some(Duration::from_secs(5)));
    }
}

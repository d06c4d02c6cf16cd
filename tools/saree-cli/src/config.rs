//! CLI configuration.

use std::collections::HashMap;

use anyhow::{Context, Result};
use saree_commerce::Latency;
use serde::{Deserialize, Serialize};

/// Default location of the JSON store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = ".saree/store.json";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Simulated delays.
    #[serde(default)]
    pub latency: Latency,

    /// Persistent store.
    #[serde(default)]
    pub store: StoreConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> CliConfig {
        let mut config = self.clone();

        if let Some(env_config) = self.environments.get(env) {
            if let Some(ref latency) = env_config.latency {
                config.latency = latency.clone();
            }
            if let Some(ref store) = env_config.store {
                config.store = store.clone();
            }
        }

        config
    }
}

/// Where the CLI keeps cart and session state between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file backing the key-value store.
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub latency: Option<Latency>,

    #[serde(default)]
    pub store: Option<StoreConfig>,
}

/// Generate a default saree.toml config file.
pub fn generate_default_config() -> String {
    r#"# Saree Mall CLI configuration

[store]
path = ".saree/store.json"

# Simulated delays in milliseconds
[latency]
catalog_load = 1000
cart_load = 1000
promo_check = 1000
order_placement = 3000
login = 1500
register = 1000
otp_verify = 1500
otp_resend = 500
social_login = 2000
newsletter = 1500
load_more = 1000
checkout_redirect = 1500

# No delays at all, for scripting
[environments.test.latency]
catalog_load = 0
cart_load = 0
product_load = 0
promo_check = 0
order_placement = 0
login = 0
register = 0
otp_verify = 0
otp_resend = 0
social_login = 0
password_reset = 0
newsletter = 0
load_more = 0
checkout_redirect = 0
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.store.path, DEFAULT_STORE_PATH);
        assert_eq!(config.latency.order_placement, 3000);

        let test = config.for_environment("test");
        assert_eq!(test.latency, Latency::instant());
        assert_eq!(config.for_environment("missing").latency.login, 1500);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saree.json");
        std::fs::write(&path, r#"{"store": {"path": "state.json"}}"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.store.path, "state.json");
        assert_eq!(config.latency, Latency::default());
    }
}

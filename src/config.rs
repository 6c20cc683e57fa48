use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry base URL; the metadata endpoint is `<base>/pypi/<name>/json`.
    pub registry_url: String,
    /// Registry request timeout in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: "https://pypi.org".to_string(),
            fetch_timeout_secs: 5,
        }
    }
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let config_path = PathBuf::from(home).join(".config/pipmate/config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_pypi() {
        let config = Config::default();
        assert_eq!(config.registry_url, "https://pypi.org");
        assert_eq!(config.fetch_timeout_secs, 5);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let config: Config = toml::from_str("registry_url = \"https://mirror.test\"").unwrap();
        assert_eq!(config.registry_url, "https://mirror.test");
        assert_eq!(config.fetch_timeout_secs, 5);
    }
}

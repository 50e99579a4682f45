//! API Configuration

use serde::{Deserialize, Serialize};

/// Default location of the JSON config file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/submission-desk/api.json";

/// API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,
    /// Upper bound applied to the `pageSize` query parameter
    pub max_page_size: u32,
    /// Number of generated demo records loaded at startup
    pub seed_demo_records: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            max_page_size: 100,
            seed_demo_records: 0,
        }
    }
}

impl ApiConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config.normalized())
    }

    /// Resolve from `CONFIG_PATH` and `BIND_ADDR`, falling back to defaults
    pub fn from_env() -> Self {
        let config_path = std::env::var("CONFIG_PATH")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

        let mut config = Self::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!(path = %config_path, error = %e, "Config not loaded, using defaults");
            Self::default()
        });

        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        config
    }

    fn normalized(mut self) -> Self {
        self.max_page_size = self.max_page_size.max(1);
        self
    }
}

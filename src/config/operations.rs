//! Config loading and validation.

use super::model::Config;
use crate::error::{LockrunError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(LockrunError::Config)` - Read error, parse error or invalid value
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockrunError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| LockrunError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// A zero sleep interval would turn the wait loop into a busy loop, so it
    /// is rejected whenever waiting is enabled.
    pub fn validate(&self) -> Result<()> {
        if self.wait && self.sleep_seconds == 0 {
            return Err(LockrunError::Config(
                "config validation failed: sleep_seconds must be greater than 0 when wait is enabled"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GrabbitError, Result};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_RECENT_DAYS: u32 = 7;

/// Configuration for grabbit, stored in config.json next to the data file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrabbitConfig {
    /// Command whose stdout is the external document text (program + args)
    #[serde(default)]
    pub sync_command: Option<Vec<String>>,

    /// Default window for the recent-purchases query, in days
    #[serde(default = "default_recent_days")]
    pub recent_days: u32,
}

fn default_recent_days() -> u32 {
    DEFAULT_RECENT_DAYS
}

impl Default for GrabbitConfig {
    fn default() -> Self {
        Self {
            sync_command: None,
            recent_days: DEFAULT_RECENT_DAYS,
        }
    }
}

impl GrabbitConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(GrabbitError::Io)?;
        let config: GrabbitConfig =
            serde_json::from_str(&content).map_err(GrabbitError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(GrabbitError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(GrabbitError::Serialization)?;
        fs::write(config_path, content).map_err(GrabbitError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GrabbitConfig::default();
        assert!(config.sync_command.is_none());
        assert_eq!(config.recent_days, 7);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = GrabbitConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, GrabbitConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let config = GrabbitConfig {
            sync_command: Some(vec!["cat".to_string(), "/tmp/doc.txt".to_string()]),
            recent_days: 14,
        };
        config.save(dir.path()).unwrap();

        let loaded = GrabbitConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed: GrabbitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, GrabbitConfig::default());
    }
}

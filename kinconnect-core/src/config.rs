use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{KinError, Result};
use crate::options::{OptionKind, OptionSet};

/// Env var that overrides the config file location
pub const CONFIG_ENV: &str = "KINCONNECT_CONFIG";

/// Centralized configuration for the kinconnect front-end
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinConfig {
    pub options: OptionsConfig,
    pub ui: UiConfig,
}

/// Overrides for the built-in option sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    /// Replaces the built-in medical conditions when set
    pub medical_conditions: Option<Vec<String>>,
    /// Replaces the built-in allergies when set
    pub allergies: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event poll timeout for the TUI loop
    pub tick_rate_ms: u64,
    /// Dropdown height cap; longer candidate lists scroll
    pub max_dropdown_rows: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            max_dropdown_rows: 8,
        }
    }
}

impl OptionsConfig {
    /// Configured set for `kind`, falling back to the built-in terms
    pub fn option_set(&self, kind: OptionKind) -> OptionSet {
        let configured = match kind {
            OptionKind::MedicalConditions => self.medical_conditions.as_ref(),
            OptionKind::Allergies => self.allergies.as_ref(),
        };

        match configured {
            Some(items) => OptionSet::new(kind, items.iter().cloned()),
            None => OptionSet::builtin(kind),
        }
    }
}

impl KinConfig {
    /// Load config from `path`.
    ///
    /// A missing file yields defaults; a present but invalid file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|err| KinError::config_parse(path, err))?;
        config.validate()?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Config file path: $KINCONNECT_CONFIG, else ~/.kinconnect/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        Self::config_dir().join("config.toml")
    }

    /// ~/.kinconnect
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".kinconnect")
    }

    /// Where the TUI writes its log (stdout belongs to the terminal UI)
    pub fn log_path() -> PathBuf {
        Self::config_dir().join("kinconnect.log")
    }

    /// Reject settings the UI cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.ui.tick_rate_ms == 0 {
            return Err(KinError::config("ui.tick_rate_ms must be greater than 0"));
        }
        if self.ui.max_dropdown_rows == 0 {
            return Err(KinError::config("ui.max_dropdown_rows must be greater than 0"));
        }
        for kind in [OptionKind::MedicalConditions, OptionKind::Allergies] {
            if self.options.option_set(kind).is_empty() {
                return Err(KinError::config(format!(
                    "options for {} are configured but empty",
                    kind
                )));
            }
        }
        Ok(())
    }

    /// Render the effective config as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|err| KinError::config(format!("failed to serialize config: {}", err)))
    }
}

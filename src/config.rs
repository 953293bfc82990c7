//! Configuration management for the validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (gedcom.toml)
//! - Environment variables (GEDCOM__*)
//!
//! ## Example config file (gedcom.toml):
//! ```toml
//! [validation]
//! max_age = 149
//! reference_date = "2024-01-01"
//!
//! [output]
//! format = "table"
//! show_people = true
//! show_families = false
//! ```

use chrono::{Local, NaiveDate};
use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::validate::DEFAULT_MAX_AGE;

/// Main configuration for the validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Rule settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Report settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Ages strictly above this are reported
    #[serde(default = "default_max_age")]
    pub max_age: u32,

    /// Fixed reference date; today's local date when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Print the individuals table before findings
    #[serde(default = "default_true")]
    pub show_people: bool,

    /// Print the families table before findings
    #[serde(default = "default_true")]
    pub show_families: bool,
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Plain,
}

// Default value functions
fn default_max_age() -> u32 {
    DEFAULT_MAX_AGE as u32
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_age: default_max_age(),
            reference_date: None,
        }
    }
}

impl ValidationConfig {
    /// The configured reference date, or today's local date when unset
    pub fn reference_or_today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            show_people: true,
            show_families: true,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration, adding a required file when given
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["gedcom.toml", ".gedcom.toml", "config/gedcom.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "gedcom-validator") {
            let xdg_config = config_dir.config_dir().join("gedcom.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // GEDCOM__VALIDATION__MAX_AGE=120
        builder = builder.add_source(
            Environment::with_prefix("GEDCOM")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

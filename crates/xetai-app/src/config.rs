//! Configuration management for xetai-catalog
//!
//! Config stored at: ~/.config/xetai-catalog/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use xetai_domain::service::{default_fee_schedule, FeeComponent, FeeKind};
use xetai_types::{ConfigError, OutputFormat, Result};

const APP_DIR: &str = "xetai-catalog";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for the compare selection (default: data dir)
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Catalog TOML file (default: built-in catalog)
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// On-road fee schedule override
    #[serde(default)]
    pub fee_schedule: Option<Vec<FeeComponent>>,

    /// Default annual loan rate in percent
    #[serde(default = "default_loan_rate")]
    pub loan_rate_percent: f64,

    /// Default loan term in months
    #[serde(default = "default_loan_months")]
    pub loan_months: u32,

    /// Default down payment in percent of price
    #[serde(default = "default_down_payment")]
    pub down_payment_percent: f64,
}

fn default_loan_rate() -> f64 {
    9.5
}

fn default_loan_months() -> u32 {
    60
}

fn default_down_payment() -> f64 {
    30.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            catalog_path: None,
            output_format: OutputFormat::Table,
            fee_schedule: None,
            loan_rate_percent: default_loan_rate(),
            loan_months: default_loan_months(),
            down_payment_percent: default_down_payment(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the compare store directory
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let store_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(store_dir)
    }

    /// Fee schedule in effect
    pub fn fees(&self) -> Vec<FeeComponent> {
        self.fee_schedule.clone().unwrap_or_else(default_fee_schedule)
    }

    /// Load config from the default location, or defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Xetai Catalog Configuration")?;
        writeln!(f, "===========================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Store dir:      {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(
            f,
            "Catalog:        {}",
            self.catalog_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Loan rate:      {:.2} %/year", self.loan_rate_percent)?;
        writeln!(f, "Loan term:      {} months", self.loan_months)?;
        writeln!(f, "Down payment:   {:.0} %", self.down_payment_percent)?;
        writeln!(
            f,
            "Fee schedule:   {}",
            if self.fee_schedule.is_some() { "custom" } else { "default" }
        )?;
        for fee in self.fees() {
            match fee.kind {
                FeeKind::Flat(amount) => writeln!(f, "  - {}: {} VND", fee.name, amount)?,
                FeeKind::Percent(rate) => writeln!(f, "  - {}: {} %", fee.name, rate)?,
            }
        }

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"loan_months": 36, "output_format": "json"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.loan_months, 36);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.loan_rate_percent, 9.5);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            store_dir: Some(dir.path().join("store")),
            fee_schedule: Some(vec![FeeComponent::flat("Phí", 1_000)]),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(xetai_types::Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_fees_default_and_override() {
        let config = Config::default();
        assert_eq!(config.fees(), default_fee_schedule());
        let custom = Config {
            fee_schedule: Some(Vec::new()),
            ..Config::default()
        };
        assert!(custom.fees().is_empty());
    }
}

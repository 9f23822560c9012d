//! Configuration management for warungbook
//!
//! This module handles loading, validation, and management of
//! warungbook configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the entries file
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// JSON file with income, expense and dish entries
    #[serde(default = "default_entries_file")]
    pub entries_file: String,
    /// Write changes back to disk. When false the book lives in memory only.
    #[serde(default = "default_true")]
    pub persist: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            entries_file: default_entries_file(),
            persist: true,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_entries_file() -> String {
    "entries.json".to_string()
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Period used by the dish analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishPeriod {
    /// Every recorded sale
    All,
    /// Current calendar month
    ThisMonth,
    /// Previous calendar month
    LastMonth,
    /// Current calendar year
    ThisYear,
}

impl Default for DishPeriod {
    fn default() -> Self {
        DishPeriod::All
    }
}

impl std::str::FromStr for DishPeriod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "all" => Ok(DishPeriod::All),
            "this_month" | "thismonth" => Ok(DishPeriod::ThisMonth),
            "last_month" | "lastmonth" => Ok(DishPeriod::LastMonth),
            "this_year" | "thisyear" => Ok(DishPeriod::ThisYear),
            _ => Err(format!("Invalid dish period: {}", s)),
        }
    }
}

impl std::fmt::Display for DishPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DishPeriod::All => write!(f, "all"),
            DishPeriod::ThisMonth => write!(f, "this_month"),
            DishPeriod::LastMonth => write!(f, "last_month"),
            DishPeriod::ThisYear => write!(f, "this_year"),
        }
    }
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Period the dish analysis uses when none is requested
    #[serde(default)]
    pub default_dish_period: DishPeriod,
    /// Number of dishes kept in the profit chart
    #[serde(default = "default_top_dishes")]
    pub top_dishes: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_dish_period: DishPeriod::All,
            top_dishes: default_top_dishes(),
        }
    }
}

fn default_top_dishes() -> usize {
    8
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO currency code
    #[serde(default = "default_currency")]
    pub code: String,
    /// Symbol printed before amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Number of decimal places shown
    #[serde(default)]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency(),
            symbol: default_symbol(),
            thousands_separator: default_thousands_sep(),
            decimal_places: 0,
        }
    }
}

fn default_currency() -> String {
    "IDR".to_string()
}

fn default_symbol() -> String {
    "Rp".to_string()
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Report settings
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::IoError)?;

        let config = Self::from_yaml(&content)?;
        log::debug!(target: "warungbook::config", "Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.data.entries_file.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "data.entries_file".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.reports.top_dishes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reports.top_dishes".to_string(),
                reason: "At least one dish must be shown".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the entries file
    pub fn entries_path(&self) -> PathBuf {
        self.data.path.join(&self.data.entries_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.data.entries_file, "entries.json");
        assert!(config.data.persist);
        assert_eq!(config.currency.symbol, "Rp");
        assert_eq!(config.currency.thousands_separator, ".");
        assert_eq!(config.reports.default_dish_period, DishPeriod::All);
        assert_eq!(config.reports.top_dishes, 8);
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.currency.code, "IDR");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "server:\n  port: 9000\nreports:\n  default_dish_period: this_month\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.reports.default_dish_period, DishPeriod::ThisMonth);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.port"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err = Config::from_yaml("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(PathBuf::from("/nonexistent/warungbook.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_entries_path() {
        let config = Config::default();
        assert_eq!(config.entries_path(), PathBuf::from("./data/entries.json"));
    }

    #[test]
    fn test_dish_period_from_str() {
        assert_eq!("all".parse::<DishPeriod>().unwrap(), DishPeriod::All);
        assert_eq!("thisMonth".parse::<DishPeriod>().unwrap(), DishPeriod::ThisMonth);
        assert_eq!("last-month".parse::<DishPeriod>().unwrap(), DishPeriod::LastMonth);
        assert_eq!("this_year".parse::<DishPeriod>().unwrap(), DishPeriod::ThisYear);
        assert!("yesterday".parse::<DishPeriod>().is_err());
    }
}

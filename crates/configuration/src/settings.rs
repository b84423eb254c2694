use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing sections and keys
/// fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub filters: DefaultFilters,
    pub dashboard: Dashboard,
    pub logging: Logging,
}

/// Where the GDP dataset comes from and how strictly it is validated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Path to the source CSV file.
    pub path: PathBuf,
    /// When true, the first malformed row aborts the load instead of being skipped.
    pub strict: bool,
}

/// The filter applied when the user doesn't pass any on the command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultFilters {
    /// Inclusive lower bound. `None` means the earliest year in the dataset.
    pub year_from: Option<i32>,
    /// Inclusive upper bound. `None` means the latest year in the dataset.
    pub year_to: Option<i32>,
    /// Countries to select. Empty means every country.
    pub countries: Vec<String>,
}

/// Which parts of the dashboard are enabled.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    pub show_kpi: bool,
    pub enable_export: bool,
    /// How many rows the "top" views show.
    pub top_n: usize,
    pub view_mode: ViewMode,
}

/// Whether record tables show absolute GDP or year-over-year growth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Absolute,
    Growth,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// Fallback filter directive when `RUST_LOG` is not set (e.g. "info", "analytics=debug").
    pub level: String,
    /// If set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("gdp.csv"),
            strict: false,
        }
    }
}

impl Default for DefaultFilters {
    fn default() -> Self {
        Self {
            year_from: Some(2000),
            year_to: None,
            countries: vec![
                "India".to_string(),
                "United States".to_string(),
                "China".to_string(),
            ],
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            show_kpi: true,
            enable_export: true,
            top_n: 10,
            view_mode: ViewMode::Absolute,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "gdp-dashboard.log".to_string(),
        }
    }
}

impl Config {
    /// Checks cross-field constraints that serde can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data.path must not be empty".to_string(),
            ));
        }
        if let (Some(from), Some(to)) = (self.filters.year_from, self.filters.year_to) {
            if from > to {
                return Err(ConfigError::ValidationError(format!(
                    "filters.year_from ({from}) is after filters.year_to ({to})"
                )));
            }
        }
        if self.filters.countries.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "filters.countries must not contain blank names".to_string(),
            ));
        }
        if self.dashboard.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.top_n must be greater than 0".to_string(),
            ));
        }
        if self.logging.file_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.file_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_dashboard_sidebar() {
        let config = Config::default();
        assert_eq!(config.filters.year_from, Some(2000));
        assert_eq!(config.filters.countries.len(), 3);
        assert!(config.dashboard.show_kpi);
        assert_eq!(config.dashboard.top_n, 10);
        assert_eq!(config.dashboard.view_mode, ViewMode::Absolute);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_year_bounds_fail_validation() {
        let mut config = Config::default();
        config.filters.year_from = Some(2010);
        config.filters.year_to = Some(2000);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn zero_top_n_fails_validation() {
        let mut config = Config::default();
        config.dashboard.top_n = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_country_fails_validation() {
        let mut config = Config::default();
        config.filters.countries.push("  ".to_string());
        assert!(config.validate().is_err());
    }
}

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Dashboard, DataSettings, DefaultFilters, Logging, ViewMode};

/// The file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration.
///
/// Sources, lowest precedence first:
/// 1. built-in defaults,
/// 2. the TOML file (`path`, or an optional `config.toml` when `path` is `None`),
/// 3. environment variables prefixed with `GDP_`, using `__` between
///    section and key (e.g. `GDP_DATA__PATH`, `GDP_DASHBOARD__TOP_N`).
///    `GDP_FILTERS__COUNTRIES` takes a comma-separated list.
///
/// An explicitly requested file must exist. The result is validated before
/// it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("GDP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("filters.countries")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(data = %config.data.path.display(), "Configuration loaded.");

    Ok(config)
}

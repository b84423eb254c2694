use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use data_io::{DatasetStore, LoadOptions};

mod cli;
mod commands;
mod filters;
mod logging;
mod render;

/// The main entry point for the GDP dashboard.
fn main() -> Result<()> {
    // Load GDP_* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // ==============================================================================
    // Configuration & Logging
    // ==============================================================================
    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = logging::init(&config.logging)?;

    // ==============================================================================
    // Dataset
    // ==============================================================================
    let store = DatasetStore::new(
        &config.data.path,
        LoadOptions {
            strict: config.data.strict,
        },
    );
    let report = store
        .reload()
        .with_context(|| format!("Failed to load dataset from {}", store.source().display()))?;
    if report.rejected() > 0 {
        tracing::warn!(
            malformed = report.malformed,
            duplicates = report.duplicates,
            "Some rows were skipped while loading the dataset."
        );
    }
    let dataset = store.snapshot();

    // Execute the appropriate command
    commands::run(cli.command, &config, &dataset, cli.format)
}

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Explore country GDP by year: KPI summaries, rankings, growth and CSV export.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file. Defaults to an optional `config.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// How results are printed.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the largest economies in the most recent year.
    Overview(OverviewArgs),
    /// Show total, average and maximum GDP for the selection.
    Summary(FilterArgs),
    /// List the selected records.
    Records(RecordsArgs),
    /// Rank the selected countries for one year, with their share of the total.
    Ranking(RankingArgs),
    /// Show the fastest-growing countries for one year.
    Growth(GrowthArgs),
    /// Write the selected records to a CSV file.
    Export(ExportArgs),
}

/// Selection flags shared by every command that filters. Anything left out
/// falls back to the `[filters]` section of the configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First year of the range (inclusive).
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year of the range (inclusive).
    #[arg(long)]
    pub to: Option<i32>,

    /// A country to include. Repeat for several countries.
    #[arg(long = "country", value_name = "NAME")]
    pub countries: Vec<String>,

    /// Ignore the configured default countries and include every country.
    #[arg(long, conflicts_with = "countries")]
    pub all_countries: bool,
}

#[derive(Args)]
pub struct OverviewArgs {
    /// How many economies to show. Defaults to `dashboard.top_n`.
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args)]
pub struct RecordsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Add a year-over-year growth column.
    #[arg(long)]
    pub growth: bool,
}

#[derive(Args)]
pub struct RankingArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Year to rank. Defaults to the end of the selected range.
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Args)]
pub struct GrowthArgs {
    /// Year to rank. Defaults to `filters.year_to`, else the latest year.
    #[arg(long)]
    pub year: Option<i32>,

    /// How many countries to show. Defaults to `dashboard.top_n`.
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Destination file.
    #[arg(long, short)]
    pub output: PathBuf,
}

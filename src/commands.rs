use crate::cli::{Commands, ExportArgs, FilterArgs, GrowthArgs, OutputFormat, OverviewArgs, RankingArgs, RecordsArgs};
use crate::filters::{self, ResolvedFilters};
use crate::render;
use analytics::{annual_growth, rank_by_value, shares, top_growth, AggregationEngine};
use anyhow::{bail, Context, Result};
use configuration::{Config, ViewMode};
use core_types::Dataset;
use serde::Serialize;
use serde_json::json;

/// Dispatches a parsed command against the loaded dataset.
pub fn run(command: Commands, config: &Config, dataset: &Dataset, format: OutputFormat) -> Result<()> {
    let engine = AggregationEngine::new();

    match command {
        Commands::Overview(args) => handle_overview(args, config, dataset, format),
        Commands::Summary(args) => handle_summary(&engine, &args, config, dataset, format),
        Commands::Records(args) => handle_records(&engine, args, config, dataset, format),
        Commands::Ranking(args) => handle_ranking(&engine, args, config, dataset, format),
        Commands::Growth(args) => handle_growth(args, config, dataset, format),
        Commands::Export(args) => handle_export(&engine, args, config, dataset, format),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The landing view: top economies in the latest year.
fn handle_overview(args: OverviewArgs, config: &Config, dataset: &Dataset, format: OutputFormat) -> Result<()> {
    let top = args.top.unwrap_or(config.dashboard.top_n);
    let overview = analytics::overview(dataset, top);

    match (format, overview) {
        (OutputFormat::Json, overview) => print_json(&json!({ "overview": overview })),
        (OutputFormat::Table, None) => {
            println!("No data available.");
            Ok(())
        }
        (OutputFormat::Table, Some(overview)) => {
            println!("Top {} Economies in {}", overview.top.len(), overview.year);
            println!("{}", render::overview_table(&overview));
            Ok(())
        }
    }
}

/// KPI cards for the current selection.
fn handle_summary(
    engine: &AggregationEngine,
    args: &FilterArgs,
    config: &Config,
    dataset: &Dataset,
    format: OutputFormat,
) -> Result<()> {
    if !config.dashboard.show_kpi {
        return match format {
            OutputFormat::Json => print_json(&disabled_summary()),
            OutputFormat::Table => {
                println!("KPI summary is disabled (dashboard.show_kpi = false).");
                Ok(())
            }
        };
    }

    let resolved = filters::resolve(args, &config.filters, dataset)?;
    let filtered = engine.filter(dataset, &resolved.selection);
    let summary = engine.summarize(&filtered);

    match format {
        // `null` rather than zeros, so consumers can tell "no data" apart.
        OutputFormat::Json => print_json(&json!({ "summary": summary })),
        OutputFormat::Table => {
            println!("{}", render::summary_table(summary.as_ref()));
            Ok(())
        }
    }
}

/// JSON body for `summary` when KPI cards are turned off.
fn disabled_summary() -> serde_json::Value {
    json!({ "summary": null, "disabled": true })
}

fn handle_records(
    engine: &AggregationEngine,
    args: RecordsArgs,
    config: &Config,
    dataset: &Dataset,
    format: OutputFormat,
) -> Result<()> {
    let resolved = filters::resolve(&args.filters, &config.filters, dataset)?;
    let filtered = engine.filter(dataset, &resolved.selection);
    let with_growth = args.growth || config.dashboard.view_mode == ViewMode::Growth;

    match (format, with_growth) {
        (OutputFormat::Json, true) => print_json(&annual_growth(&filtered)),
        (OutputFormat::Json, false) => print_json(&filtered),
        (OutputFormat::Table, true) => {
            println!("{}", render::growth_records_table(&annual_growth(&filtered)));
            Ok(())
        }
        (OutputFormat::Table, false) => {
            println!("{}", render::records_table(&filtered));
            Ok(())
        }
    }
}

/// Ranking and share of total for the selected countries in one year.
fn handle_ranking(
    engine: &AggregationEngine,
    args: RankingArgs,
    config: &Config,
    dataset: &Dataset,
    format: OutputFormat,
) -> Result<()> {
    let resolved = filters::resolve(&args.filters, &config.filters, dataset)?;
    let Some(year) = ranking_year(&args, &resolved) else {
        println!("No data available.");
        return Ok(());
    };

    let snapshot = engine.year_snapshot(dataset, year, resolved.selection.countries.iter().cloned());
    let ranked = rank_by_value(&snapshot, snapshot.len());
    let shares = shares(&ranked);

    match format {
        OutputFormat::Json => print_json(&json!({ "year": year, "ranking": shares })),
        OutputFormat::Table => {
            println!("GDP Ranking - {year}");
            println!("{}", render::shares_table(&shares));
            Ok(())
        }
    }
}

/// An explicit `--year`, else the end of the resolved range.
fn ranking_year(args: &RankingArgs, resolved: &ResolvedFilters) -> Option<i32> {
    args.year.or(resolved.year_to)
}

/// Fastest-growing countries, measured over the whole dataset.
fn handle_growth(args: GrowthArgs, config: &Config, dataset: &Dataset, format: OutputFormat) -> Result<()> {
    let Some(year) = args
        .year
        .or(config.filters.year_to)
        .or(dataset.latest_year())
    else {
        println!("No data available.");
        return Ok(());
    };
    let top = args.top.unwrap_or(config.dashboard.top_n);
    let points = top_growth(dataset, year, top);

    match format {
        OutputFormat::Json => print_json(&json!({ "year": year, "growth": points })),
        OutputFormat::Table => {
            println!("Top Performers by Growth - {year}");
            println!("{}", render::growth_records_table(&points));
            Ok(())
        }
    }
}

fn handle_export(
    engine: &AggregationEngine,
    args: ExportArgs,
    config: &Config,
    dataset: &Dataset,
    format: OutputFormat,
) -> Result<()> {
    if !config.dashboard.enable_export {
        bail!("Data export is disabled (dashboard.enable_export = false)");
    }

    let resolved = filters::resolve(&args.filters, &config.filters, dataset)?;
    let filtered = engine.filter(dataset, &resolved.selection);
    let rows = engine.to_exportable_rows(&filtered);
    let written = data_io::export_to_path(&rows, &args.output)
        .with_context(|| format!("Failed to export to {}", args.output.display()))?;

    match format {
        OutputFormat::Json => print_json(&json!({ "rows": written, "path": args.output.display().to_string() })),
        OutputFormat::Table => {
            println!("Wrote {written} rows to {}", args.output.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::GdpRecord;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            GdpRecord::new("India", None, 2020, 2.0).unwrap(),
            GdpRecord::new("India", None, 2021, 3.0).unwrap(),
            GdpRecord::new("China", None, 2021, 14.0).unwrap(),
        ])
        .unwrap()
    }

    fn ranking_args(filters: FilterArgs, year: Option<i32>) -> RankingArgs {
        RankingArgs { filters, year }
    }

    #[test]
    fn ranking_year_defaults_to_end_of_range() {
        let config = Config::default();
        let dataset = dataset();
        let filters = FilterArgs {
            from: Some(2019),
            to: Some(2020),
            ..FilterArgs::default()
        };
        let resolved = filters::resolve(&filters, &config.filters, &dataset).unwrap();

        assert_eq!(ranking_year(&ranking_args(filters.clone(), None), &resolved), Some(2020));
        assert_eq!(ranking_year(&ranking_args(filters, Some(2021)), &resolved), Some(2021));
    }

    #[test]
    fn ranking_year_falls_back_to_latest_year() {
        let config = Config::default();
        let dataset = dataset();
        let filters = FilterArgs::default();
        let mut defaults = config.filters.clone();
        defaults.year_from = None;
        defaults.year_to = None;
        let resolved = filters::resolve(&filters, &defaults, &dataset).unwrap();

        assert_eq!(ranking_year(&ranking_args(filters, None), &resolved), Some(2021));
    }

    #[test]
    fn disabled_summary_is_json() {
        let body = serde_json::to_string(&disabled_summary()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(parsed["summary"].is_null());
        assert_eq!(parsed["disabled"], true);
    }

    #[test]
    fn export_is_refused_when_disabled() {
        let mut config = Config::default();
        config.dashboard.enable_export = false;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let command = Commands::Export(ExportArgs {
            filters: FilterArgs::default(),
            output: output.clone(),
        });

        let err = run(command, &config, &dataset(), OutputFormat::Table).unwrap_err();
        assert!(err.to_string().contains("disabled"), "{err}");
        assert!(!output.exists());
    }

    #[test]
    fn export_writes_selected_rows() {
        let config = Config::default();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let command = Commands::Export(ExportArgs {
            filters: FilterArgs {
                countries: vec!["India".to_string()],
                ..FilterArgs::default()
            },
            output: output.clone(),
        });

        run(command, &config, &dataset(), OutputFormat::Json).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert!(written.lines().skip(1).all(|line| line.starts_with("India,")));
    }
}

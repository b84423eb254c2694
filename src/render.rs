use analytics::{CountryShare, GrowthPoint, Overview, Summary};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::GdpRecord;

const NOT_AVAILABLE: &str = "N/A";

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Formats a GDP figure as whole dollars with thousands separators.
pub fn format_gdp(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn format_pct(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}%"))
}

/// The three KPI cards. An empty selection shows "N/A" on every card.
pub fn summary_table(summary: Option<&Summary>) -> Table {
    let mut table = new_table(&["Total GDP", "Average GDP", "Max GDP", "Max attained by", "Records"]);
    match summary {
        Some(summary) => table.add_row(vec![
            right(format_gdp(summary.total)),
            right(format_gdp(summary.average)),
            right(format_gdp(summary.max.value)),
            Cell::new(format!("{} ({})", summary.max.country, summary.max.year)),
            right(summary.count.to_string()),
        ]),
        None => table.add_row(vec![
            NOT_AVAILABLE,
            NOT_AVAILABLE,
            NOT_AVAILABLE,
            NOT_AVAILABLE,
            "0",
        ]),
    };
    table
}

pub fn records_table(records: &[&GdpRecord]) -> Table {
    let mut table = new_table(&["Country", "Code", "Region", "Year", "GDP"]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.country()),
            Cell::new(record.code().unwrap_or("")),
            Cell::new(record.region().map(|r| r.label()).unwrap_or("")),
            Cell::new(record.year()),
            right(format_gdp(record.value())),
        ]);
    }
    table
}

pub fn growth_records_table(points: &[GrowthPoint<'_>]) -> Table {
    let mut table = new_table(&["Country", "Year", "GDP", "Growth"]);
    for point in points {
        table.add_row(vec![
            Cell::new(point.country),
            Cell::new(point.year),
            right(format_gdp(point.value)),
            right(format_pct(point.growth_pct)),
        ]);
    }
    table
}

pub fn shares_table(shares: &[CountryShare<'_>]) -> Table {
    let mut table = new_table(&["Rank", "Country", "GDP", "Share"]);
    for (rank, share) in shares.iter().enumerate() {
        table.add_row(vec![
            right((rank + 1).to_string()),
            Cell::new(share.country),
            right(format_gdp(share.value)),
            right(format_pct(share.share_pct)),
        ]);
    }
    table
}

pub fn overview_table(overview: &Overview<'_>) -> Table {
    let mut table = new_table(&["Rank", "Country", "GDP"]);
    for (rank, record) in overview.top.iter().enumerate() {
        table.add_row(vec![
            right((rank + 1).to_string()),
            Cell::new(record.country()),
            right(format_gdp(record.value())),
        ]);
    }
    table
}

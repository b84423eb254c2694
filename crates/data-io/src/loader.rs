use crate::error::IngestError;
use core_types::{Dataset, GdpRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const COUNTRY_COLUMN: &str = "Country Name";
const CODE_COLUMN: &str = "Country Code";
const YEAR_COLUMN: &str = "Year";
const VALUE_COLUMN: &str = "GDP";
const LEGACY_VALUE_COLUMN: &str = "Value";

/// How the loader treats rows that fail validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Abort on the first bad row instead of skipping it.
    pub strict: bool,
}

/// Row counts from a completed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub accepted: usize,
    pub malformed: usize,
    pub duplicates: usize,
}

impl LoadReport {
    pub fn rejected(&self) -> usize {
        self.malformed + self.duplicates
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub report: LoadReport,
}

/// One CSV row before validation. Every field is optional so that a bad row
/// can be reported with a useful reason instead of a bare serde error.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Country Name")]
    country: Option<String>,
    #[serde(rename = "Country Code", default)]
    code: Option<String>,
    #[serde(rename = "Year")]
    year: Option<i32>,
    #[serde(rename = "GDP", alias = "Value")]
    value: Option<f64>,
}

enum Rejection {
    Malformed(String),
    Duplicate(String),
}

/// Loads and validates a GDP dataset from a CSV file.
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<LoadOutcome, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), strict = options.strict, "Loading GDP dataset.");
    parse_csv(file, options)
}

/// Parses and validates GDP rows from any CSV source.
///
/// Expects the headers `Country Name`, `Year` and `GDP` (or the legacy
/// `Value`), with an optional `Country Code`. Rows failing validation, and
/// any repeat of a (country, year) pair already seen, are skipped and counted
/// unless `options.strict` is set.
pub fn parse_csv<R: Read>(reader: R, options: &LoadOptions) -> Result<LoadOutcome, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    require_columns(&headers)?;
    if !headers.iter().any(|h| h == CODE_COLUMN) {
        tracing::debug!("No '{}' column; regions will be unavailable.", CODE_COLUMN);
    }

    let mut records = Vec::new();
    let mut seen: HashSet<(String, i32)> = HashSet::new();
    let mut report = LoadReport::default();
    let mut row = csv::ByteRecord::new();

    // Rows are read as bytes so that a row with invalid UTF-8 is rejected on
    // its own instead of failing the whole load.
    while csv_reader.read_byte_record(&mut row)? {
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let outcome = csv::StringRecord::from_byte_record(row.clone())
            .map_err(|e| Rejection::Malformed(format!("invalid UTF-8: {}", e.utf8_error())))
            .and_then(|row| {
                row.deserialize::<RawRow>(Some(&headers))
                    .map_err(|e| Rejection::Malformed(e.to_string()))
            })
            .and_then(validate_row)
            .and_then(|record| {
                if seen.insert((record.country().to_string(), record.year())) {
                    Ok(record)
                } else {
                    Err(Rejection::Duplicate(format!(
                        "duplicate entry for '{}' in {}",
                        record.country(),
                        record.year()
                    )))
                }
            });

        match outcome {
            Ok(record) => records.push(record),
            Err(rejection) => {
                let reason = match &rejection {
                    Rejection::Malformed(reason) | Rejection::Duplicate(reason) => reason.clone(),
                };
                if options.strict {
                    return Err(IngestError::MalformedRow { line, reason });
                }
                tracing::warn!(line, reason = %reason, "Skipping GDP row.");
                match rejection {
                    Rejection::Malformed(_) => report.malformed += 1,
                    Rejection::Duplicate(_) => report.duplicates += 1,
                }
            }
        }
    }

    report.accepted = records.len();
    let dataset = Dataset::new(records)?;

    tracing::info!(
        accepted = report.accepted,
        malformed = report.malformed,
        duplicates = report.duplicates,
        years = dataset.years().len(),
        countries = dataset.countries().len(),
        "GDP dataset loaded."
    );

    Ok(LoadOutcome { dataset, report })
}

fn require_columns(headers: &csv::StringRecord) -> Result<(), IngestError> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    for column in [COUNTRY_COLUMN, YEAR_COLUMN] {
        if !has(column) {
            return Err(IngestError::MissingColumn(column.to_string()));
        }
    }
    if !has(VALUE_COLUMN) && !has(LEGACY_VALUE_COLUMN) {
        return Err(IngestError::MissingColumn(format!(
            "{VALUE_COLUMN} (or {LEGACY_VALUE_COLUMN})"
        )));
    }
    Ok(())
}

fn validate_row(raw: RawRow) -> Result<GdpRecord, Rejection> {
    let country = raw
        .country
        .ok_or_else(|| Rejection::Malformed(format!("missing {COUNTRY_COLUMN}")))?;
    let year = raw
        .year
        .ok_or_else(|| Rejection::Malformed(format!("missing {YEAR_COLUMN}")))?;
    let value = raw
        .value
        .ok_or_else(|| Rejection::Malformed(format!("missing {VALUE_COLUMN}")))?;

    GdpRecord::new(country, raw.code, year, value).map_err(|e| Rejection::Malformed(e.to_string()))
}

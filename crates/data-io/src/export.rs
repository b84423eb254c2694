use crate::error::IngestError;
use analytics::{ExportRow, ExportRows};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes `rows` as CSV, header first, and returns the number of data rows.
///
/// The header is written even when there are no rows, so an empty export is
/// still a valid file.
pub fn write_csv<W: Write>(rows: &ExportRows<'_, '_>, writer: W) -> Result<usize, IngestError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(ExportRow::HEADERS)?;
    let mut written = 0;
    for row in rows.iter() {
        csv_writer.serialize(row)?;
        written += 1;
    }
    csv_writer.flush()?;

    Ok(written)
}

/// Creates (or truncates) `path` and writes `rows` into it.
pub fn export_to_path(rows: &ExportRows<'_, '_>, path: &Path) -> Result<usize, IngestError> {
    let file = File::create(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let written = write_csv(rows, file)?;
    tracing::info!(rows = written, path = %path.display(), "Export written.");
    Ok(written)
}

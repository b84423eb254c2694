use core_types::GdpRecord;
use serde::Serialize;

/// A flat row ready for a delimited-text writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow<'a> {
    #[serde(rename = "Country Name")]
    pub country: &'a str,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "GDP")]
    pub value: f64,
}

impl ExportRow<'_> {
    /// Column headers, matching the serialized field names.
    pub const HEADERS: [&'static str; 3] = ["Country Name", "Year", "GDP"];
}

impl<'a> From<&'a GdpRecord> for ExportRow<'a> {
    fn from(record: &'a GdpRecord) -> Self {
        Self {
            country: record.country(),
            year: record.year(),
            value: record.value(),
        }
    }
}

/// A lazy view over already-filtered records.
///
/// Nothing is materialised up front; every call to [`ExportRows::iter`]
/// starts a fresh pass, so the view can be consumed any number of times.
#[derive(Debug, Clone, Copy)]
pub struct ExportRows<'r, 'a> {
    records: &'r [&'a GdpRecord],
}

impl<'r, 'a> ExportRows<'r, 'a> {
    pub fn new(records: &'r [&'a GdpRecord]) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = ExportRow<'a>> {
        self.records.iter().map(|record| ExportRow::from(*record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

use crate::report::{MaxRecord, Summary};
use crate::rows::ExportRows;
use crate::summation::CompensatedSum;
use core_types::{Dataset, FilterSelection, GdpRecord};

/// A stateless calculator for filtering a dataset and deriving KPI figures.
///
/// Every operation is a pure function of its inputs: the engine holds no
/// state, never mutates the dataset, and can be shared freely between
/// concurrent callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AggregationEngine {}

impl AggregationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records matching `selection`, in dataset order.
    ///
    /// A selection naming years or countries that don't exist simply matches
    /// nothing; it is not an error.
    pub fn filter<'a>(&self, dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a GdpRecord> {
        let records = dataset.records();

        let filtered: Vec<&GdpRecord> = match dataset.candidate_positions(selection) {
            None => records.iter().collect(),
            Some(positions) => positions
                .into_iter()
                .map(|position| &records[position])
                .filter(|record| selection.matches(record))
                .collect(),
        };

        tracing::debug!(
            dataset = dataset.len(),
            matched = filtered.len(),
            years = selection.years.len(),
            countries = selection.countries.len(),
            "Filter applied."
        );

        filtered
    }

    /// Computes total, average and maximum over `records`.
    ///
    /// # Returns
    ///
    /// `None` when `records` is empty. Ties for the maximum go to the record
    /// that appears first.
    pub fn summarize(&self, records: &[&GdpRecord]) -> Option<Summary> {
        let (first, rest) = records.split_first()?;

        let mut total = CompensatedSum::new();
        total.add(first.value());
        let mut max = *first;

        for record in rest {
            total.add(record.value());
            if record.value() > max.value() {
                max = *record;
            }
        }

        let count = records.len();
        let total = total.total();

        Some(Summary {
            count,
            total,
            average: total / count as f64,
            max: MaxRecord {
                value: max.value(),
                country: max.country().to_string(),
                year: max.year(),
            },
        })
    }

    /// Wraps filtered records in a restartable view of flat export rows.
    pub fn to_exportable_rows<'r, 'a>(&self, records: &'r [&'a GdpRecord]) -> ExportRows<'r, 'a> {
        ExportRows::new(records)
    }

    /// Records of a single `year`, optionally restricted to `countries`.
    pub fn year_snapshot<'a, I, S>(&self, dataset: &'a Dataset, year: i32, countries: I) -> Vec<&'a GdpRecord>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selection = FilterSelection::new()
            .with_years([year])
            .with_countries(countries);
        self.filter(dataset, &selection)
    }
}

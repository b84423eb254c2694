use crate::error::CoreError;
use crate::record::GdpRecord;
use crate::selection::FilterSelection;
use std::collections::{BTreeMap, HashSet};

/// An immutable, validated collection of GDP records.
///
/// The dataset keeps the records in their load order and builds two position
/// indices (by year and by country) once at construction. A dataset is never
/// mutated after it has been built; reloading means building a new one.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<GdpRecord>,
    by_year: BTreeMap<i32, Vec<usize>>,
    by_country: BTreeMap<String, Vec<usize>>,
}

impl Dataset {
    /// Builds a dataset, rejecting any repeated (country, year) pair.
    pub fn new(records: Vec<GdpRecord>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert((record.country(), record.year())) {
                return Err(CoreError::DuplicateRecord {
                    country: record.country().to_string(),
                    year: record.year(),
                });
            }
        }

        let mut by_year: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        let mut by_country: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (position, record) in records.iter().enumerate() {
            by_year.entry(record.year()).or_default().push(position);
            by_country
                .entry(record.country().to_string())
                .or_default()
                .push(position);
        }

        tracing::debug!(
            records = records.len(),
            years = by_year.len(),
            countries = by_country.len(),
            "Dataset indexed."
        );

        Ok(Self {
            records,
            by_year,
            by_country,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[GdpRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.by_year.keys().copied().collect()
    }

    /// Distinct country names present, ascending.
    pub fn countries(&self) -> Vec<&str> {
        self.by_country.keys().map(String::as_str).collect()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.by_year.keys().next_back().copied()
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.by_country.contains_key(country)
    }

    /// Positions that can possibly satisfy `selection`, in ascending order.
    ///
    /// Returns `None` for an unrestricted selection (every position is a
    /// candidate). When both axes are restricted the smaller candidate list is
    /// returned; callers still have to apply the full predicate.
    pub fn candidate_positions(&self, selection: &FilterSelection) -> Option<Vec<usize>> {
        let by_year = (!selection.years.is_empty()).then(|| {
            collect_positions(selection.years.iter().filter_map(|y| self.by_year.get(y)))
        });
        let by_country = (!selection.countries.is_empty()).then(|| {
            collect_positions(
                selection
                    .countries
                    .iter()
                    .filter_map(|c| self.by_country.get(c)),
            )
        });

        match (by_year, by_country) {
            (None, None) => None,
            (Some(positions), None) | (None, Some(positions)) => Some(positions),
            (Some(years), Some(countries)) => {
                if years.len() <= countries.len() {
                    Some(years)
                } else {
                    Some(countries)
                }
            }
        }
    }
}

fn collect_positions<'a, I>(lists: I) -> Vec<usize>
where
    I: Iterator<Item = &'a Vec<usize>>,
{
    let mut positions: Vec<usize> = lists.flatten().copied().collect();
    positions.sort_unstable();
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            GdpRecord::new("A", None, 2020, 100.0).unwrap(),
            GdpRecord::new("B", None, 2020, 200.0).unwrap(),
            GdpRecord::new("A", None, 2021, 150.0).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_country_year() {
        let result = Dataset::new(vec![
            GdpRecord::new("A", None, 2020, 1.0).unwrap(),
            GdpRecord::new("A", None, 2020, 2.0).unwrap(),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CoreError::DuplicateRecord {
                country: "A".to_string(),
                year: 2020
            }
        );
    }

    #[test]
    fn exposes_distinct_sorted_axes() {
        let dataset = sample();
        assert_eq!(dataset.years(), vec![2020, 2021]);
        assert_eq!(dataset.countries(), vec!["A", "B"]);
        assert_eq!(dataset.latest_year(), Some(2021));
        assert!(dataset.contains_country("B"));
        assert!(!dataset.contains_country("C"));
    }

    #[test]
    fn empty_dataset_has_no_latest_year() {
        assert_eq!(Dataset::empty().latest_year(), None);
        assert!(Dataset::empty().is_empty());
    }

    #[test]
    fn unrestricted_selection_has_no_candidates_list() {
        assert_eq!(sample().candidate_positions(&FilterSelection::new()), None);
    }

    #[test]
    fn candidates_come_back_in_dataset_order() {
        let dataset = sample();
        let selection = FilterSelection::new().with_countries(["A"]);
        assert_eq!(dataset.candidate_positions(&selection), Some(vec![0, 2]));

        let selection = FilterSelection::new().with_years([2021, 2020]);
        assert_eq!(dataset.candidate_positions(&selection), Some(vec![0, 1, 2]));
    }

    #[test]
    fn picks_the_narrower_axis() {
        let dataset = sample();
        let selection = FilterSelection::new()
            .with_years([2020])
            .with_countries(["B"]);
        assert_eq!(dataset.candidate_positions(&selection), Some(vec![1]));
    }

    #[test]
    fn unknown_values_yield_no_candidates() {
        let dataset = sample();
        let selection = FilterSelection::new().with_countries(["C"]);
        assert_eq!(dataset.candidate_positions(&selection), Some(vec![]));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_dataset() -> impl Strategy<Value = Dataset> {
            prop::collection::btree_map((0u8..6, 1990i32..2000), 0.0f64..1e6, 0..40).prop_map(
                |rows| {
                    let records = rows
                        .into_iter()
                        .map(|((c, year), value)| {
                            GdpRecord::new(format!("C{c}"), None, year, value).unwrap()
                        })
                        .collect();
                    Dataset::new(records).unwrap()
                },
            )
        }

        proptest! {
            #[test]
            fn prop_candidates_cover_every_match(
                dataset in arb_dataset(),
                years in prop::collection::btree_set(1988i32..2002, 0..4),
                countries in prop::collection::btree_set(0u8..8, 0..4),
            ) {
                let selection = FilterSelection::new()
                    .with_years(years)
                    .with_countries(countries.into_iter().map(|c| format!("C{c}")));
                let all: Vec<usize> = (0..dataset.len()).collect();
                let candidates = dataset.candidate_positions(&selection).unwrap_or(all);

                prop_assert!(candidates.windows(2).all(|w| w[0] < w[1]));
                for (position, record) in dataset.records().iter().enumerate() {
                    if selection.matches(record) {
                        prop_assert!(candidates.contains(&position));
                    }
                }
            }
        }
    }
}

use crate::engine::AggregationEngine;
use crate::ranking::rank_by_value;
use core_types::{Dataset, GdpRecord};
use serde::Serialize;

/// The landing view: the largest economies in the most recent year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview<'a> {
    pub year: i32,
    pub top: Vec<&'a GdpRecord>,
}

/// Builds the overview for the latest year in `dataset`, or `None` if the
/// dataset is empty.
pub fn overview(dataset: &Dataset, n: usize) -> Option<Overview<'_>> {
    let year = dataset.latest_year()?;
    let records = AggregationEngine::new().year_snapshot(dataset, year, Vec::<String>::new());

    Some(Overview {
        year,
        top: rank_by_value(&records, n),
    })
}

use crate::summation::compensated_sum;
use core_types::GdpRecord;
use serde::Serialize;

/// Sorts `records` by value, largest first, and keeps the top `n`.
///
/// Equal values keep their incoming order.
pub fn rank_by_value<'a>(records: &[&'a GdpRecord], n: usize) -> Vec<&'a GdpRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.value().total_cmp(&a.value()));
    ranked.truncate(n);
    ranked
}

/// One slice of a share-of-total breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryShare<'a> {
    pub country: &'a str,
    pub year: i32,
    pub value: f64,
    /// Percentage of the total; `None` when the total is zero.
    pub share_pct: Option<f64>,
}

pub fn shares<'a>(records: &[&'a GdpRecord]) -> Vec<CountryShare<'a>> {
    let total = compensated_sum(records.iter().map(|r| r.value()));

    records
        .iter()
        .map(|record| CountryShare {
            country: record.country(),
            year: record.year(),
            value: record.value(),
            share_pct: (total > 0.0).then(|| record.value() / total * 100.0),
        })
        .collect()
}

use core_types::{Dataset, GdpRecord};
use serde::Serialize;

/// A record annotated with its change against the same country's previous
/// available year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPoint<'a> {
    pub country: &'a str,
    pub year: i32,
    pub value: f64,
    /// `None` for a country's first year, or when the previous value is zero.
    pub growth_pct: Option<f64>,
}

/// Annual growth for every record, ordered by country then year.
///
/// Gaps in a country's series are not filled: growth is measured against the
/// previous year that is present in `records`.
pub fn annual_growth<'a>(records: &[&'a GdpRecord]) -> Vec<GrowthPoint<'a>> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.country().cmp(b.country()).then(a.year().cmp(&b.year())));

    let mut previous: Option<&GdpRecord> = None;
    sorted
        .into_iter()
        .map(|record| {
            let growth_pct = match previous {
                Some(prev) if prev.country() == record.country() && prev.value() > 0.0 => {
                    Some((record.value() - prev.value()) / prev.value() * 100.0)
                }
                _ => None,
            };
            previous = Some(record);

            GrowthPoint {
                country: record.country(),
                year: record.year(),
                value: record.value(),
                growth_pct,
            }
        })
        .collect()
}

/// The `n` fastest-growing countries in `year`, measured over the whole dataset.
pub fn top_growth(dataset: &Dataset, year: i32, n: usize) -> Vec<GrowthPoint<'_>> {
    let all: Vec<&GdpRecord> = dataset.records().iter().collect();

    let mut points: Vec<GrowthPoint<'_>> = annual_growth(&all)
        .into_iter()
        .filter(|point| point.year == year && point.growth_pct.is_some())
        .collect();

    // Stable sort: equal growth keeps country order.
    points.sort_by(|a, b| growth_key(b).total_cmp(&growth_key(a)));
    points.truncate(n);
    points
}

fn growth_key(point: &GrowthPoint<'_>) -> f64 {
    point.growth_pct.unwrap_or(f64::NEG_INFINITY)
}

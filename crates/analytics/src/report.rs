use serde::{Deserialize, Serialize};

/// The record that attained the maximum GDP in a summarized set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxRecord {
    pub value: f64,
    pub country: String,
    pub year: i32,
}

/// KPI figures for a non-empty set of records.
///
/// There is deliberately no zeroed-out constructor: an empty selection is
/// represented by the absence of a `Summary`, not by one full of zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    pub max: MaxRecord,
}

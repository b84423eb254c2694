use crate::error::CoreError;
use crate::record::GdpRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The user's current choice of years and countries.
///
/// An empty set on either axis means "no restriction" on that axis, so the
/// default selection matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub years: BTreeSet<i32>,
    #[serde(default)]
    pub countries: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_years<I>(mut self, years: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        self.years.extend(years);
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries.extend(countries.into_iter().map(Into::into));
        self
    }

    /// Restricts the selection to the inclusive range `from..=to`.
    ///
    /// An inverted range is rejected: it would otherwise expand to an empty
    /// set, which means "all years".
    pub fn with_year_range(self, from: i32, to: i32) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::InvalidInput(
                "year range".to_string(),
                format!("start year {from} is after end year {to}"),
            ));
        }
        Ok(self.with_years(from..=to))
    }

    /// True when neither axis is restricted.
    pub fn is_unrestricted(&self) -> bool {
        self.years.is_empty() && self.countries.is_empty()
    }

    /// The membership predicate applied by the aggregation engine.
    pub fn matches(&self, record: &GdpRecord) -> bool {
        (self.years.is_empty() || self.years.contains(&record.year()))
            && (self.countries.is_empty() || self.countries.contains(record.country()))
    }
}

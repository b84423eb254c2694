use crate::enums::Region;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single (country, year, GDP) observation.
///
/// Records can only be built through [`GdpRecord::new`], which enforces the
/// invariants every downstream calculation relies on: a non-empty country,
/// a real calendar year and a finite, non-negative value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GdpRecord {
    country: String,
    code: Option<String>,
    year: i32,
    value: f64,
}

impl GdpRecord {
    pub fn new(
        country: impl Into<String>,
        code: Option<String>,
        year: i32,
        value: f64,
    ) -> Result<Self, CoreError> {
        let country = country.into().trim().to_string();
        if country.is_empty() {
            return Err(CoreError::EmptyCountry);
        }
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(CoreError::InvalidYear(year));
        }
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidValue(value));
        }
        let code = code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            country,
            code,
            year,
            value,
        })
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The region derived from the country code, if the code is known.
    pub fn region(&self) -> Option<Region> {
        self.code.as_deref().and_then(Region::from_code)
    }
}

// Deserialisation goes through the validating constructor so that a record
// read from JSON can never bypass the invariants.
impl<'de> Deserialize<'de> for GdpRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            country: String,
            #[serde(default)]
            code: Option<String>,
            year: i32,
            value: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        GdpRecord::new(raw.country, raw.code, raw.year, raw.value).map_err(serde::de::Error::custom)
    }
}

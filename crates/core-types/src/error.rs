use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Country name must not be empty")]
    EmptyCountry,

    #[error("Year {0} is not a valid calendar year")]
    InvalidYear(i32),

    #[error("GDP value {0} must be finite and non-negative")]
    InvalidValue(f64),

    #[error("Duplicate record for country '{country}' in year {year}")]
    DuplicateRecord { country: String, year: i32 },

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

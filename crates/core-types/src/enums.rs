use serde::{Deserialize, Serialize};
use std::fmt;

/// Continental grouping used to colour and group countries on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Asia,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Africa,
    Oceania,
}

impl Region {
    /// Maps a two-letter country code to its region.
    ///
    /// Only the codes the dashboard knows about are mapped; anything else
    /// (including lowercase input that doesn't match after normalisation)
    /// returns `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        let region = match code.as_str() {
            "CN" | "IN" | "JP" | "ID" | "KR" | "SG" | "SA" => Region::Asia,
            "DE" | "FR" | "GB" | "IT" | "RU" | "ES" => Region::Europe,
            "US" | "CA" | "MX" => Region::NorthAmerica,
            "BR" | "AR" | "CO" => Region::SouthAmerica,
            "ZA" | "NG" | "EG" | "KE" => Region::Africa,
            "AU" | "NZ" => Region::Oceania,
            _ => return None,
        };
        Some(region)
    }

    /// Human-readable label, as shown in tables.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::Africa => "Africa",
            Region::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

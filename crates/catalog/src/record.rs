use foundation::color::Rgb;
use foundation::coords::LatLng;
use serde::Serialize;

use crate::palette::color_for_language_count;

/// Capital placeholder when the source lists none.
pub const NOT_AVAILABLE: &str = "N/A";
/// Region / subregion placeholder.
pub const UNKNOWN: &str = "Unknown";
/// White flag, shown when the source has no flag glyph.
pub const PLACEHOLDER_FLAG: &str = "🏳️";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDivision {
    pub name: String,
    pub languages: Option<Vec<String>>,
}

/// Normalized facts about one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub name: String,
    pub official_name: String,
    #[serde(flatten)]
    pub coordinates: LatLng,
    pub capital: String,
    pub region: String,
    pub subregion: String,
    pub population: u64,
    pub languages: Vec<String>,
    pub flag: String,
    pub currencies: Option<String>,
    pub timezones: Option<String>,
    pub divisions: Vec<AdminDivision>,
}

impl CountryRecord {
    /// A record with every optional field at its default.
    pub fn new(
        name: impl Into<String>,
        official_name: impl Into<String>,
        coordinates: LatLng,
    ) -> Self {
        Self {
            name: name.into(),
            official_name: official_name.into(),
            coordinates,
            capital: NOT_AVAILABLE.to_string(),
            region: UNKNOWN.to_string(),
            subregion: UNKNOWN.to_string(),
            population: 0,
            languages: Vec::new(),
            flag: PLACEHOLDER_FLAG.to_string(),
            currencies: None,
            timezones: None,
            divisions: Vec::new(),
        }
    }

    pub fn display_color(&self) -> Rgb {
        color_for_language_count(self.languages.len())
    }

    pub fn has_capital(&self) -> bool {
        self.capital != NOT_AVAILABLE
    }

    pub fn has_known_subregion(&self) -> bool {
        self.subregion != UNKNOWN
    }

    pub fn speaks(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }
}

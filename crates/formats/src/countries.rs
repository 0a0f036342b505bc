//! Wire shape of the bulk country-facts endpoint (`restcountries.com/v3.1`).
//!
//! Every field is optional on the wire. Decoding is lenient: an element that
//! is not an object is counted and skipped instead of failing the whole
//! payload, a mistyped optional field reads as absent, and loosely typed
//! fields (coordinates, population, the keyed language and currency maps)
//! are kept as JSON values and read through accessors.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::FormatError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawCountryName {
    pub common: String,
    pub official: String,
}

/// Administrative division attached to a country by sources that carry one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawDivision {
    pub name: String,
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawCountry {
    pub name: RawCountryName,
    #[serde(deserialize_with = "lenient")]
    pub latlng: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub capital: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub subregion: Option<String>,
    pub population: Option<Value>,
    /// Language names keyed by ISO 639-3 code, e.g. `{"fra": "French"}`.
    #[serde(deserialize_with = "lenient")]
    pub languages: Option<Map<String, Value>>,
    /// Currency objects keyed by ISO 4217 code, e.g. `{"EUR": {"name": "Euro"}}`.
    #[serde(deserialize_with = "lenient")]
    pub currencies: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    pub timezones: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub flag: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub states: Option<Vec<RawDivision>>,
}

// A value of the wrong shape reads as `None` rather than rejecting the record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl RawCountry {
    /// Raw `latlng` as numbers; `None` if absent or any entry is not numeric.
    pub fn coordinate_values(&self) -> Option<Vec<f64>> {
        self.latlng
            .as_ref()?
            .iter()
            .map(Value::as_f64)
            .collect::<Option<Vec<f64>>>()
    }

    /// Language names in payload order.
    pub fn language_names(&self) -> Vec<String> {
        let Some(map) = &self.languages else {
            return Vec::new();
        };
        map.values()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect()
    }

    /// Currency display names in payload order.
    pub fn currency_names(&self) -> Vec<String> {
        let Some(map) = &self.currencies else {
            return Vec::new();
        };
        map.values()
            .filter_map(|v| v.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }

    /// Population as a non-negative integer. Negative or non-numeric values
    /// read as `None`; fractional values are rounded.
    pub fn population_count(&self) -> Option<u64> {
        let value = self.population.as_ref()?;
        if let Some(n) = value.as_u64() {
            return Some(n);
        }
        let f = value.as_f64()?;
        if f.is_finite() && f >= 0.0 {
            Some(f.round() as u64)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountriesPayload {
    pub countries: Vec<RawCountry>,
    /// Array elements that could not be decoded as a country object.
    pub rejected: usize,
}

pub fn parse_countries_str(payload: &str) -> Result<CountriesPayload, FormatError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| FormatError::Json(e.to_string()))?;
    parse_countries_value(value)
}

pub fn parse_countries_value(value: Value) -> Result<CountriesPayload, FormatError> {
    let Value::Array(items) = value else {
        return Err(FormatError::NotAnArray);
    };

    let mut out = CountriesPayload {
        countries: Vec::with_capacity(items.len()),
        rejected: 0,
    };
    for item in items {
        match serde_json::from_value::<RawCountry>(item) {
            Ok(country) => out.countries.push(country),
            Err(_) => out.rejected += 1,
        }
    }
    Ok(out)
}

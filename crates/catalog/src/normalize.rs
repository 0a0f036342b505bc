use foundation::coords::LatLng;
use formats::countries::{CountriesPayload, RawCountry, RawDivision};
use serde::Serialize;

use crate::record::{AdminDivision, CountryRecord, NOT_AVAILABLE, PLACEHOLDER_FLAG, UNKNOWN};
use crate::snapshot::CountrySnapshot;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingCoordinates,
    MissingName,
}

/// Counts from one normalization pass. Dropped records are not errors; the
/// report exists for diagnostics only.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeReport {
    pub accepted: usize,
    pub missing_coordinates: usize,
    pub missing_name: usize,
    /// Payload elements the decoder could not read as a country at all.
    pub undecodable: usize,
}

impl NormalizeReport {
    pub fn dropped(&self) -> usize {
        self.missing_coordinates + self.missing_name + self.undecodable
    }
}

pub fn normalize_countries(payload: &CountriesPayload) -> (CountrySnapshot, NormalizeReport) {
    let mut report = NormalizeReport {
        undecodable: payload.rejected,
        ..NormalizeReport::default()
    };
    let mut records = Vec::with_capacity(payload.countries.len());

    for raw in &payload.countries {
        match normalize_country(raw) {
            Ok(record) => {
                report.accepted += 1;
                records.push(record);
            }
            Err(Rejection::MissingCoordinates) => report.missing_coordinates += 1,
            Err(Rejection::MissingName) => report.missing_name += 1,
        }
    }

    (CountrySnapshot::new(records), report)
}

pub fn normalize_country(raw: &RawCountry) -> Result<CountryRecord, Rejection> {
    let coordinates = raw
        .coordinate_values()
        .and_then(|pair| LatLng::from_pair(&pair))
        .ok_or(Rejection::MissingCoordinates)?;

    let name = non_blank(Some(raw.name.common.as_str())).ok_or(Rejection::MissingName)?;
    let official_name = non_blank(Some(raw.name.official.as_str())).unwrap_or_else(|| name.clone());

    let capital = raw
        .capital
        .as_ref()
        .and_then(|c| non_blank(c.first().map(String::as_str)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let currencies = join_non_empty(&raw.currency_names());
    let timezones = raw.timezones.as_deref().and_then(join_non_empty);

    Ok(CountryRecord {
        name,
        official_name,
        coordinates,
        capital,
        region: non_blank(raw.region.as_deref()).unwrap_or_else(|| UNKNOWN.to_string()),
        subregion: non_blank(raw.subregion.as_deref()).unwrap_or_else(|| UNKNOWN.to_string()),
        population: raw.population_count().unwrap_or(0),
        languages: raw.language_names(),
        flag: non_blank(raw.flag.as_deref()).unwrap_or_else(|| PLACEHOLDER_FLAG.to_string()),
        currencies,
        timezones,
        divisions: raw
            .states
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(normalize_division)
            .collect(),
    })
}

fn normalize_division(raw: &RawDivision) -> Option<AdminDivision> {
    let name = non_blank(Some(raw.name.as_str()))?;
    let languages = raw.languages.clone().filter(|l| !l.is_empty());
    Some(AdminDivision { name, languages })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn join_non_empty(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::{NormalizeReport, Rejection, normalize_countries, normalize_country};
    use crate::record::{NOT_AVAILABLE, PLACEHOLDER_FLAG, UNKNOWN};
    use formats::countries::{RawCountry, parse_countries_str};
    use pretty_assertions::assert_eq;

    fn raw(json: &str) -> RawCountry {
        serde_json::from_str(json).expect("raw country")
    }

    #[test]
    fn drops_records_without_coordinates() {
        let payload = parse_countries_str(
            r#"[
                {"name": {"common": "France", "official": "French Republic"},
                 "latlng": [48.85, 2.35], "languages": {"fra": "French"}},
                {"name": {"common": "Nowhere", "official": "Nowhere"},
                 "languages": {"eng": "English"}}
            ]"#,
        )
        .expect("parse");

        let (snapshot, report) = normalize_countries(&payload);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].name, "France");
        let languages: Vec<&str> = snapshot.languages().iter().collect();
        assert_eq!(languages, vec!["French"]);
        assert_eq!(
            report,
            NormalizeReport {
                accepted: 1,
                missing_coordinates: 1,
                missing_name: 0,
                undecodable: 0,
            }
        );
    }

    #[test]
    fn coordinate_pair_must_have_two_entries() {
        for latlng in ["[]", "[10.0]", "[1.0, 2.0, 3.0]", "null"] {
            let json = format!(r#"{{"name": {{"common": "X"}}, "latlng": {latlng}}}"#);
            assert_eq!(
                normalize_country(&raw(&json)),
                Err(Rejection::MissingCoordinates),
                "latlng {latlng}"
            );
        }
    }

    #[test]
    fn missing_name_is_rejected() {
        assert_eq!(
            normalize_country(&raw(r#"{"latlng": [1.0, 2.0]}"#)),
            Err(Rejection::MissingName)
        );
    }

    #[test]
    fn optional_fields_default() {
        let record = normalize_country(&raw(
            r#"{"name": {"common": "Bouvet Island"}, "latlng": [-54.4, 3.4], "region": "", "capital": []}"#,
        ))
        .expect("record");
        assert_eq!(record.official_name, "Bouvet Island");
        assert_eq!(record.capital, NOT_AVAILABLE);
        assert_eq!(record.region, UNKNOWN);
        assert_eq!(record.subregion, UNKNOWN);
        assert_eq!(record.population, 0);
        assert!(record.languages.is_empty());
        assert_eq!(record.flag, PLACEHOLDER_FLAG);
        assert_eq!(record.currencies, None);
        assert_eq!(record.timezones, None);
        assert!(record.divisions.is_empty());
    }

    #[test]
    fn mistyped_fields_default_instead_of_dropping() {
        let payload = parse_countries_str(
            r#"[{"name": {"common": "Monaco"}, "latlng": [43.7, 7.4], "region": 5, "capital": "Monaco"}]"#,
        )
        .expect("parse");
        let (snapshot, report) = normalize_countries(&payload);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.undecodable, 0);
        let monaco = &snapshot.records()[0];
        assert_eq!(monaco.region, UNKNOWN);
        assert_eq!(monaco.capital, NOT_AVAILABLE);
    }

    #[test]
    fn flattens_maps_and_lists() {
        let record = normalize_country(&raw(
            r#"{
                "name": {"common": "Switzerland", "official": "Swiss Confederation"},
                "latlng": [47.0, 8.0],
                "capital": ["Bern"],
                "languages": {"fra": "French", "gsw": "Swiss German", "ita": "Italian", "roh": "Romansh"},
                "currencies": {"CHF": {"name": "Swiss franc", "symbol": "Fr."}},
                "timezones": ["UTC+01:00"],
                "flag": "🇨🇭"
            }"#,
        ))
        .expect("record");
        assert_eq!(record.capital, "Bern");
        assert_eq!(
            record.languages,
            vec!["French", "Swiss German", "Italian", "Romansh"]
        );
        assert_eq!(record.currencies.as_deref(), Some("Swiss franc"));
        assert_eq!(record.timezones.as_deref(), Some("UTC+01:00"));
        assert_eq!(record.display_color().to_hex(), "#8ab4f8");
    }

    #[test]
    fn joins_multiple_currencies_and_timezones() {
        let record = normalize_country(&raw(
            r#"{
                "name": {"common": "Panama"},
                "latlng": [9.0, -80.0],
                "currencies": {"PAB": {"name": "Panamanian balboa"}, "USD": {"name": "United States dollar"}},
                "timezones": ["UTC-05:00", "UTC-06:00"]
            }"#,
        ))
        .expect("record");
        assert_eq!(
            record.currencies.as_deref(),
            Some("Panamanian balboa, United States dollar")
        );
        assert_eq!(record.timezones.as_deref(), Some("UTC-05:00, UTC-06:00"));
    }

    #[test]
    fn empty_maps_resolve_to_absent() {
        let record = normalize_country(&raw(
            r#"{"name": {"common": "Antarctica"}, "latlng": [-90.0, 0.0], "currencies": {}, "timezones": []}"#,
        ))
        .expect("record");
        assert_eq!(record.currencies, None);
        assert_eq!(record.timezones, None);
    }

    #[test]
    fn keeps_divisions_with_names() {
        let record = normalize_country(&raw(
            r#"{
                "name": {"common": "Spain"},
                "latlng": [40.0, -4.0],
                "states": [
                    {"name": "Catalonia", "languages": ["Catalan", "Spanish"]},
                    {"name": "Madrid", "languages": []},
                    {"name": " "}
                ]
            }"#,
        ))
        .expect("record");
        assert_eq!(record.divisions.len(), 2);
        assert_eq!(record.divisions[0].name, "Catalonia");
        assert_eq!(
            record.divisions[0].languages,
            Some(vec!["Catalan".to_string(), "Spanish".to_string()])
        );
        assert_eq!(record.divisions[1].languages, None);
    }

    #[test]
    fn catalog_counts_each_language_once() {
        let payload = parse_countries_str(
            r#"[
                {"name": {"common": "A"}, "latlng": [0, 0], "languages": {"eng": "English", "fra": "French"}},
                {"name": {"common": "B"}, "latlng": [1, 1], "languages": {"eng": "English"}},
                {"name": {"common": "C"}, "latlng": [2, 2], "languages": {"fra": "French", "deu": "German"}}
            ]"#,
        )
        .expect("parse");
        let (snapshot, _) = normalize_countries(&payload);
        assert_eq!(snapshot.languages().len(), 3);
    }
}

//! View-models for the globe's hover tooltip and detail card.
//!
//! These are plain data; turning them into markup is the caller's job. None
//! of the functions here touch the records they read.

use catalog::enrich::EnrichedFeature;
use catalog::record::CountryRecord;
use catalog::snapshot::CountrySnapshot;
use serde::Serialize;

/// Shown in place of an empty language list.
pub const NO_DATA: &str = "No data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelHeader {
    pub flag: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipView {
    pub header: LabelHeader,
    pub official_name: String,
    /// Absent when the record has no capital.
    pub capital: Option<String>,
    /// Region, with the subregion in parentheses when known.
    pub region: String,
    pub population: String,
    pub language_count: usize,
    pub languages: String,
    pub currency: Option<String>,
    pub timezones: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionView {
    pub name: String,
    pub languages: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionsSection {
    pub count: usize,
    pub items: Vec<DivisionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFooter {
    pub currency: Option<String>,
    pub timezones: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCardView {
    pub header: LabelHeader,
    pub official_name: String,
    pub facts: Vec<Fact>,
    /// Number of languages actually spoken; `language_tags` may hold a
    /// placeholder when this is zero.
    pub language_count: usize,
    pub language_tags: Vec<String>,
    pub divisions: Option<DivisionsSection>,
    pub footer: Option<CardFooter>,
}

fn header(record: &CountryRecord) -> LabelHeader {
    LabelHeader {
        flag: record.flag.clone(),
        name: record.name.clone(),
    }
}

pub fn tooltip_view(record: &CountryRecord) -> TooltipView {
    let region = if record.has_known_subregion() {
        format!("{} ({})", record.region, record.subregion)
    } else {
        record.region.clone()
    };
    let languages = if record.languages.is_empty() {
        NO_DATA.to_string()
    } else {
        record.languages.join(", ")
    };

    TooltipView {
        header: header(record),
        official_name: record.official_name.clone(),
        capital: record.has_capital().then(|| record.capital.clone()),
        region,
        population: format_population(record.population),
        language_count: record.languages.len(),
        languages,
        currency: record.currencies.clone(),
        timezones: record.timezones.clone(),
    }
}

pub fn card_view(record: &CountryRecord) -> CountryCardView {
    let fact = |label: &str, value: String| Fact {
        label: label.to_string(),
        value,
    };
    let facts = vec![
        fact("Capital", record.capital.clone()),
        fact("Population", format_population(record.population)),
        fact("Region", record.region.clone()),
        fact("Subregion", record.subregion.clone()),
    ];

    let language_tags = if record.languages.is_empty() {
        vec![NO_DATA.to_string()]
    } else {
        record.languages.clone()
    };

    let divisions = (!record.divisions.is_empty()).then(|| DivisionsSection {
        count: record.divisions.len(),
        items: record
            .divisions
            .iter()
            .map(|d| DivisionView {
                name: d.name.clone(),
                languages: d.languages.as_ref().map(|l| l.join(", ")),
            })
            .collect(),
    });

    let footer = (record.currencies.is_some() || record.timezones.is_some()).then(|| CardFooter {
        currency: record.currencies.clone(),
        timezones: record.timezones.clone(),
    });

    CountryCardView {
        header: header(record),
        official_name: record.official_name.clone(),
        facts,
        language_count: record.languages.len(),
        language_tags,
        divisions,
        footer,
    }
}

/// Card for a border feature; `None` when the feature matched no record.
pub fn feature_card_view(
    snapshot: &CountrySnapshot,
    feature: &EnrichedFeature<'_>,
) -> Option<CountryCardView> {
    let record = snapshot.get(feature.country?)?;
    Some(card_view(record))
}

/// Integer with comma thousands separators, e.g. `67,391,582`.
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

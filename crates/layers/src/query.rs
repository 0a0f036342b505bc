use std::collections::BTreeSet;

use catalog::record::CountryRecord;
use catalog::snapshot::CountrySnapshot;
use foundation::ids::RecordId;
use serde::{Deserialize, Serialize};

/// Distinct-value menus show at most this many values.
pub const MENU_LIMIT: usize = 50;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Region,
    Country,
    Language,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Region, Category::Country, Category::Language];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Region => "region",
            Category::Country => "country",
            Category::Language => "language",
        }
    }

    /// Menu entry that clears the selection.
    pub fn sentinel(self) -> &'static str {
        match self {
            Category::Region => "All Regions",
            Category::Country => "All Countries",
            Category::Language => "All Languages",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// True for values that reset a selection: blank, or any category sentinel.
pub fn is_reset_value(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || Category::ALL.iter().any(|c| c.sentinel() == value)
}

/// What the globe should currently show. Text search and category selection
/// are alternatives; choosing one replaces the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PointQuery {
    #[default]
    All,
    Search(String),
    Select { category: Category, value: String },
}

impl PointQuery {
    /// Lowercased, trimmed search; blank text means `All`.
    pub fn search(text: &str) -> Self {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            PointQuery::All
        } else {
            PointQuery::Search(needle)
        }
    }

    /// Exact-value selection; sentinel or blank values mean `All`.
    pub fn select(category: Category, value: &str) -> Self {
        if is_reset_value(value) {
            PointQuery::All
        } else {
            PointQuery::Select {
                category,
                value: value.to_string(),
            }
        }
    }
}

pub fn run_query(snapshot: &CountrySnapshot, query: &PointQuery) -> Vec<RecordId> {
    match query {
        PointQuery::All => snapshot.ids().collect(),
        PointQuery::Search(needle) => filter_ids(snapshot, |r| search_matches(r, needle)),
        PointQuery::Select { category, value } => {
            filter_ids(snapshot, |r| selection_matches(r, *category, value))
        }
    }
}

/// Case-insensitive substring search over name, region and languages.
pub fn search(snapshot: &CountrySnapshot, text: &str) -> Vec<RecordId> {
    run_query(snapshot, &PointQuery::search(text))
}

pub fn select(snapshot: &CountrySnapshot, category: Category, value: &str) -> Vec<RecordId> {
    run_query(snapshot, &PointQuery::select(category, value))
}

fn filter_ids<F>(snapshot: &CountrySnapshot, mut keep: F) -> Vec<RecordId>
where
    F: FnMut(&CountryRecord) -> bool,
{
    snapshot
        .iter()
        .filter(|(_, record)| keep(record))
        .map(|(id, _)| id)
        .collect()
}

// `needle` is already lowercased.
fn search_matches(record: &CountryRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.region.to_lowercase().contains(needle)
        || record
            .languages
            .iter()
            .any(|l| l.to_lowercase().contains(needle))
}

// Region and country compare for equality; language checks list membership.
fn selection_matches(record: &CountryRecord, category: Category, value: &str) -> bool {
    match category {
        Category::Region => record.region == value,
        Category::Country => record.name == value,
        Category::Language => record.speaks(value),
    }
}

/// Sorted distinct values for a category, capped at [`MENU_LIMIT`].
pub fn distinct_values(snapshot: &CountrySnapshot, category: Category) -> Vec<String> {
    let values: BTreeSet<&str> = match category {
        Category::Region => snapshot.records().iter().map(|r| r.region.as_str()).collect(),
        Category::Country => snapshot.records().iter().map(|r| r.name.as_str()).collect(),
        Category::Language => snapshot.languages().iter().collect(),
    };
    values
        .into_iter()
        .take(MENU_LIMIT)
        .map(str::to_string)
        .collect()
}

/// The sentinel entry followed by the category's distinct values.
pub fn menu_options(snapshot: &CountrySnapshot, category: Category) -> Vec<String> {
    let mut options = Vec::with_capacity(MENU_LIMIT + 1);
    options.push(category.sentinel().to_string());
    options.extend(distinct_values(snapshot, category));
    options
}

#[cfg(test)]
mod tests {
    use super::{
        Category, MENU_LIMIT, PointQuery, distinct_values, is_reset_value, menu_options,
        run_query, search, select,
    };
    use catalog::record::CountryRecord;
    use catalog::snapshot::CountrySnapshot;
    use foundation::coords::LatLng;
    use foundation::ids::RecordId;
    use pretty_assertions::assert_eq;

    fn record(name: &str, region: &str, languages: &[&str]) -> CountryRecord {
        CountryRecord {
            region: region.to_string(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
            ..CountryRecord::new(name, name, LatLng::new(0.0, 0.0))
        }
    }

    fn snapshot() -> CountrySnapshot {
        CountrySnapshot::new(vec![
            record("France", "Europe", &["French"]),
            record("Canada", "Americas", &["English", "French"]),
            record("Japan", "Asia", &["Japanese"]),
            record("Eurasia Station", "Antarctic", &[]),
        ])
    }

    fn ids(raw: &[u32]) -> Vec<RecordId> {
        raw.iter().copied().map(RecordId::new).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let s = snapshot();
        assert_eq!(search(&s, "FRAN"), search(&s, "fran"));
        assert_eq!(search(&s, "fran"), ids(&[0, 1]));
    }

    #[test]
    fn search_matches_name_region_or_language() {
        let s = snapshot();
        // France matches through its region only.
        assert_eq!(search(&s, "euro"), ids(&[0]));
        assert_eq!(search(&s, "eur"), ids(&[0, 3]));
        assert_eq!(search(&s, "japanese"), ids(&[2]));
        assert_eq!(search(&s, "glish"), ids(&[1]));
        assert!(search(&s, "klingon").is_empty());
    }

    #[test]
    fn blank_search_resets() {
        let s = snapshot();
        assert_eq!(search(&s, ""), ids(&[0, 1, 2, 3]));
        assert_eq!(search(&s, "   "), ids(&[0, 1, 2, 3]));
        assert_eq!(PointQuery::search("  Fr "), PointQuery::Search("fr".to_string()));
    }

    #[test]
    fn sentinels_return_everything() {
        let s = snapshot();
        let all = ids(&[0, 1, 2, 3]);
        assert_eq!(select(&s, Category::Region, "All Regions"), all);
        assert_eq!(select(&s, Category::Country, "All Countries"), all);
        assert_eq!(select(&s, Category::Language, "All Languages"), all);
        assert!(is_reset_value(""));
        assert!(!is_reset_value("Allemagne"));
    }

    #[test]
    fn selection_is_exact() {
        let s = snapshot();
        assert_eq!(select(&s, Category::Region, "Europe"), ids(&[0]));
        assert!(select(&s, Category::Region, "Eur").is_empty());
        assert!(select(&s, Category::Region, "europe").is_empty());
        assert_eq!(select(&s, Category::Country, "Japan"), ids(&[2]));
    }

    #[test]
    fn language_selection_uses_containment() {
        let s = snapshot();
        assert_eq!(select(&s, Category::Language, "French"), ids(&[0, 1]));
        assert!(select(&s, Category::Language, "Fren").is_empty());
    }

    #[test]
    fn queries_do_not_mutate_snapshot() {
        let s = snapshot();
        let before = s.clone();
        let _ = run_query(&s, &PointQuery::search("fr"));
        let _ = run_query(&s, &PointQuery::select(Category::Region, "Asia"));
        assert_eq!(s, before);
    }

    #[test]
    fn distinct_values_sorted_and_deduplicated() {
        let s = snapshot();
        assert_eq!(
            distinct_values(&s, Category::Region),
            vec!["Americas", "Antarctic", "Asia", "Europe"]
        );
        assert_eq!(
            distinct_values(&s, Category::Language),
            vec!["English", "French", "Japanese"]
        );
        assert_eq!(
            menu_options(&s, Category::Language),
            vec!["All Languages", "English", "French", "Japanese"]
        );
    }

    #[test]
    fn distinct_values_capped() {
        let records = (0..120)
            .map(|i| record(&format!("Country {i:03}"), "Region", &[]))
            .collect();
        let s = CountrySnapshot::new(records);
        let values = distinct_values(&s, Category::Country);
        assert_eq!(values.len(), MENU_LIMIT);
        assert_eq!(values[0], "Country 000");
        assert_eq!(values[MENU_LIMIT - 1], "Country 049");
        assert_eq!(menu_options(&s, Category::Country).len(), MENU_LIMIT + 1);
    }

    #[test]
    fn category_parses() {
        assert_eq!("Region".parse::<Category>(), Ok(Category::Region));
        assert_eq!("language".parse::<Category>(), Ok(Category::Language));
        assert!("script".parse::<Category>().is_err());
    }
}

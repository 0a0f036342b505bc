use std::collections::BTreeSet;

use foundation::ids::RecordId;
use serde::Serialize;

use crate::record::CountryRecord;
use crate::stats::SnapshotStats;

/// Distinct language names across a snapshot, in sorted order.
///
/// Only built from records; there is no way to insert into it afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageCatalog {
    names: BTreeSet<String>,
}

impl LanguageCatalog {
    pub fn from_records(records: &[CountryRecord]) -> Self {
        let names = records
            .iter()
            .flat_map(|r| r.languages.iter().cloned())
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, language: &str) -> bool {
        self.names.contains(language)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Immutable result of one load: the records and the languages they use.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CountrySnapshot {
    records: Vec<CountryRecord>,
    languages: LanguageCatalog,
}

impl CountrySnapshot {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        let languages = LanguageCatalog::from_records(&records);
        Self { records, languages }
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn languages(&self) -> &LanguageCatalog {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&CountryRecord> {
        self.records.get(id.index())
    }

    /// Records paired with their ids, in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &CountryRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| RecordId::from_index(i).map(|id| (id, r)))
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    pub fn stats(&self) -> SnapshotStats {
        SnapshotStats::from_snapshot(self)
    }

    /// Hex blake3 digest of the serialized records. Two snapshots with the
    /// same records in the same order hash identically.
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for record in &self.records {
            // Serializing a plain struct of strings and numbers cannot fail.
            if let Ok(bytes) = serde_json::to_vec(record) {
                hasher.update(&bytes);
            }
            hasher.update(b"\n");
        }
        hasher.finalize().to_hex().to_string()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    Live,
    Fallback,
}

impl DataOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            DataOrigin::Live => "live",
            DataOrigin::Fallback => "fallback",
        }
    }
}

/// Which path produced the country snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Live(CountrySnapshot),
    Fallback(CountrySnapshot),
}

impl LoadOutcome {
    pub fn origin(&self) -> DataOrigin {
        match self {
            LoadOutcome::Live(_) => DataOrigin::Live,
            LoadOutcome::Fallback(_) => DataOrigin::Fallback,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, LoadOutcome::Live(_))
    }

    pub fn snapshot(&self) -> &CountrySnapshot {
        match self {
            LoadOutcome::Live(s) | LoadOutcome::Fallback(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CountrySnapshot, DataOrigin, LoadOutcome};
    use crate::record::CountryRecord;
    use foundation::coords::LatLng;
    use foundation::ids::RecordId;
    use pretty_assertions::assert_eq;

    fn record(name: &str, languages: &[&str]) -> CountryRecord {
        CountryRecord {
            languages: languages.iter().map(|l| l.to_string()).collect(),
            ..CountryRecord::new(name, name, LatLng::new(0.0, 0.0))
        }
    }

    #[test]
    fn catalog_is_distinct_and_sorted() {
        let snapshot = CountrySnapshot::new(vec![
            record("Belgium", &["Dutch", "French", "German"]),
            record("France", &["French"]),
            record("Switzerland", &["French", "Swiss German", "Italian", "Romansh"]),
        ]);
        let names: Vec<&str> = snapshot.languages().iter().collect();
        assert_eq!(
            names,
            vec!["Dutch", "French", "German", "Italian", "Romansh", "Swiss German"]
        );
        assert_eq!(snapshot.languages().len(), 6);
    }

    #[test]
    fn ids_follow_record_order() {
        let snapshot = CountrySnapshot::new(vec![record("A", &[]), record("B", &[])]);
        let ids: Vec<RecordId> = snapshot.ids().collect();
        assert_eq!(ids, vec![RecordId::new(0), RecordId::new(1)]);
        assert_eq!(
            snapshot.get(RecordId::new(1)).map(|r| r.name.as_str()),
            Some("B")
        );
        assert!(snapshot.get(RecordId::new(2)).is_none());
    }

    #[test]
    fn content_hash_tracks_records() {
        let a = CountrySnapshot::new(vec![record("A", &["X"])]);
        let b = CountrySnapshot::new(vec![record("A", &["X"])]);
        let c = CountrySnapshot::new(vec![record("A", &["Y"])]);
        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn outcome_tags_origin() {
        let live = LoadOutcome::Live(CountrySnapshot::default());
        let fallback = LoadOutcome::Fallback(CountrySnapshot::default());
        assert!(live.is_live());
        assert_eq!(live.origin(), DataOrigin::Live);
        assert_eq!(fallback.origin().as_str(), "fallback");
    }
}

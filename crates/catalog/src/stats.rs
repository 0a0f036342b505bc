use serde::Serialize;

use crate::snapshot::CountrySnapshot;

/// Headline numbers shown above the globe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStats {
    pub language_count: usize,
    pub country_count: usize,
    pub total_population: u64,
    /// Total population in billions, one decimal, e.g. `7.9B`.
    pub population_label: String,
}

impl SnapshotStats {
    pub fn from_snapshot(snapshot: &CountrySnapshot) -> Self {
        let total_population = snapshot
            .records()
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.population));
        Self {
            language_count: snapshot.languages().len(),
            country_count: snapshot.len(),
            total_population,
            population_label: billions_label(total_population),
        }
    }
}

pub fn billions_label(population: u64) -> String {
    format!("{:.1}B", population as f64 / 1_000_000_000.0)
}

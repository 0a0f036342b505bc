//! Synthetic countries used when the live country fetch fails, so the globe
//! still has something to show.

use foundation::coords::LatLng;
use rand::Rng;

use crate::record::CountryRecord;
use crate::snapshot::CountrySnapshot;

pub const FALLBACK_COUNT: usize = 195;
pub const FALLBACK_FLAG: &str = "🌍";
pub const FALLBACK_LANGUAGES: [&str; 2] = ["Language A", "Language B"];

pub fn generate_fallback_records<R: Rng>(rng: &mut R, count: usize) -> Vec<CountryRecord> {
    (0..count)
        .map(|i| {
            let name = format!("Country {i}");
            let coordinates = LatLng::new(
                rng.gen_range(-75.0..75.0),
                rng.gen_range(-180.0..180.0),
            );
            CountryRecord {
                capital: "Capital".to_string(),
                region: "Region".to_string(),
                population: rng.gen_range(0..100_000_000u64),
                languages: FALLBACK_LANGUAGES.iter().map(|l| l.to_string()).collect(),
                flag: FALLBACK_FLAG.to_string(),
                ..CountryRecord::new(name.clone(), name, coordinates)
            }
        })
        .collect()
}

/// Snapshot of exactly [`FALLBACK_COUNT`] synthetic records.
pub fn generate_fallback<R: Rng>(rng: &mut R) -> CountrySnapshot {
    CountrySnapshot::new(generate_fallback_records(rng, FALLBACK_COUNT))
}

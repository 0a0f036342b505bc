//! Turns raw source payloads into snapshots, falling back instead of failing.

use catalog::enrich::{EnrichedBorders, enrich_borders};
use catalog::fallback::generate_fallback;
use catalog::normalize::{NormalizeReport, normalize_countries};
use catalog::snapshot::{CountrySnapshot, LoadOutcome};
use formats::countries::parse_countries_value;
use formats::geojson::BorderCollection;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::sources::{DataSource, DataSourceError};

/// Result of the countries load: the tagged snapshot and, for live data,
/// what normalization kept and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct CountriesLoad {
    pub outcome: LoadOutcome,
    pub report: Option<NormalizeReport>,
}

/// Fetch, parse and normalize the country facts. Any failure, or a payload
/// with no usable records, yields the synthetic fallback snapshot instead.
pub async fn load_countries(source: &dyn DataSource, fallback_seed: Option<u64>) -> CountriesLoad {
    match fetch_countries(source).await {
        Ok((snapshot, report)) => {
            info!(
                source = source.name(),
                records = snapshot.len(),
                languages = snapshot.languages().len(),
                dropped = report.dropped(),
                "country data loaded"
            );
            CountriesLoad {
                outcome: LoadOutcome::Live(snapshot),
                report: Some(report),
            }
        }
        Err(err) => {
            warn!(
                source = source.name(),
                cause = ?err.source,
                "using fallback country data: {err}"
            );
            let mut rng = fallback_rng(fallback_seed);
            CountriesLoad {
                outcome: LoadOutcome::Fallback(generate_fallback(&mut rng)),
                report: None,
            }
        }
    }
}

async fn fetch_countries(
    source: &dyn DataSource,
) -> Result<(CountrySnapshot, NormalizeReport), DataSourceError> {
    let body = source.fetch().await?;
    let value: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| DataSourceError::with_source("country payload is not JSON", e))?;
    let payload = parse_countries_value(value)
        .map_err(|e| DataSourceError::with_source("unexpected country payload", e))?;

    let (snapshot, report) = normalize_countries(&payload);
    if snapshot.is_empty() {
        return Err(DataSourceError::new(format!(
            "no usable country records ({} dropped)",
            report.dropped()
        )));
    }
    Ok((snapshot, report))
}

fn fallback_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Fetch the border polygons. Needs no country data, so it can run while
/// the countries are still loading. On failure the result is empty.
pub async fn fetch_borders(source: &dyn DataSource) -> BorderCollection {
    match read_borders(source).await {
        Ok(borders) => {
            info!(
                source = source.name(),
                features = borders.features.len(),
                skipped = borders.skipped,
                "border polygons fetched"
            );
            borders
        }
        Err(err) => {
            warn!(
                source = source.name(),
                cause = ?err.source,
                "border polygons unavailable: {err}"
            );
            BorderCollection::default()
        }
    }
}

/// Join fetched polygons to the published country snapshot.
pub fn join_borders(borders: BorderCollection, snapshot: &CountrySnapshot) -> EnrichedBorders {
    let enriched = enrich_borders(borders, snapshot);
    info!(
        features = enriched.len(),
        matched = enriched.matched_count(),
        "border polygons joined"
    );
    enriched
}

async fn read_borders(source: &dyn DataSource) -> Result<BorderCollection, DataSourceError> {
    let body = source.fetch().await?;
    let value: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| DataSourceError::with_source("border payload is not JSON", e))?;
    BorderCollection::from_geojson_value(value)
        .map_err(|e| DataSourceError::with_source("unexpected border payload", e))
}

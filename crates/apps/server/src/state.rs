use std::sync::Arc;

use catalog::enrich::EnrichedBorders;
use catalog::normalize::NormalizeReport;
use catalog::snapshot::{CountrySnapshot, DataOrigin, LoadOutcome};
use layers::globe::GlobeView;
use layers::points::PointsLayer;
use layers::polygons::PolygonsLayer;
use parking_lot::RwLock;

use crate::loader::CountriesLoad;

/// Loaded country data plus facts about how it was obtained.
#[derive(Debug)]
pub struct CountriesState {
    pub outcome: LoadOutcome,
    pub report: Option<NormalizeReport>,
    pub content_hash: String,
}

impl CountriesState {
    pub fn new(load: CountriesLoad) -> Self {
        let content_hash = load.outcome.snapshot().content_hash();
        Self {
            outcome: load.outcome,
            report: load.report,
            content_hash,
        }
    }

    pub fn snapshot(&self) -> &CountrySnapshot {
        self.outcome.snapshot()
    }

    pub fn origin(&self) -> DataOrigin {
        self.outcome.origin()
    }
}

/// Shared handler state. Each data slot is written once by its loader task
/// and read by handlers, which clone the `Arc` out before doing any work.
#[derive(Clone, Default)]
pub struct AppState {
    countries: Arc<RwLock<Option<Arc<CountriesState>>>>,
    borders: Arc<RwLock<Option<Arc<EnrichedBorders>>>>,
    pub globe: Arc<GlobeView>,
    pub points: PointsLayer,
    pub polygons: PolygonsLayer,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countries(&self) -> Option<Arc<CountriesState>> {
        self.countries.read().clone()
    }

    pub fn borders(&self) -> Option<Arc<EnrichedBorders>> {
        self.borders.read().clone()
    }

    pub fn publish_countries(&self, countries: CountriesState) -> Arc<CountriesState> {
        let countries = Arc::new(countries);
        *self.countries.write() = Some(countries.clone());
        countries
    }

    pub fn publish_borders(&self, borders: EnrichedBorders) {
        *self.borders.write() = Some(Arc::new(borders));
    }
}

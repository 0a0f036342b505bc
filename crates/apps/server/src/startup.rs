//! Startup wiring: the two loads run as independent tasks.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::loader;
use crate::sources::DataSource;
use crate::state::{AppState, CountriesState};

pub struct LoaderTasks {
    pub countries: JoinHandle<()>,
    pub borders: JoinHandle<()>,
}

/// Starts both fetches at once. The borders task fetches immediately and
/// only waits for the published country snapshot before joining polygons
/// to it.
pub fn spawn_loaders(
    state: AppState,
    countries_source: Arc<dyn DataSource>,
    borders_source: Arc<dyn DataSource>,
    fallback_seed: Option<u64>,
) -> LoaderTasks {
    let (tx, mut rx) = watch::channel::<Option<Arc<CountriesState>>>(None);

    let countries_state = state.clone();
    let countries = tokio::spawn(async move {
        let load = loader::load_countries(countries_source.as_ref(), fallback_seed).await;
        let published = countries_state.publish_countries(CountriesState::new(load));
        info!(
            origin = published.origin().as_str(),
            "country snapshot published"
        );
        // The borders task may already be gone; nothing else listens.
        let _ = tx.send(Some(published));
    });

    let borders = tokio::spawn(async move {
        let fetched = loader::fetch_borders(borders_source.as_ref()).await;
        let countries = match rx.wait_for(Option::is_some).await {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        let Some(countries) = countries else {
            error!("countries task ended without publishing; borders not joined");
            return;
        };
        state.publish_borders(loader::join_borders(fetched, countries.snapshot()));
    });

    LoaderTasks { countries, borders }
}

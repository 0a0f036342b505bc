use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header::{self, HeaderName};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use catalog::enrich::EnrichedBorders;
use catalog::normalize::NormalizeReport;
use catalog::stats::SnapshotStats;
use foundation::ids::RecordId;
use layers::globe::GlobeView;
use layers::labels::{CountryCardView, TooltipView, card_view, feature_card_view, tooltip_view};
use layers::points::{PointStyle, PointsSnapshot};
use layers::polygons::PolygonStyle;
use layers::query::{Category, PointQuery, menu_options, run_query};
use layers::Layer;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::render::{card_html, tooltip_html};
use crate::state::{AppState, CountriesState};

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<T, ApiError>;

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

fn countries_or_503(state: &AppState) -> ApiResult<Arc<CountriesState>> {
    state
        .countries()
        .ok_or_else(|| api_error(StatusCode::SERVICE_UNAVAILABLE, "country data is still loading"))
}

fn borders_or_503(state: &AppState) -> ApiResult<Arc<EnrichedBorders>> {
    state
        .borders()
        .ok_or_else(|| api_error(StatusCode::SERVICE_UNAVAILABLE, "border data is still loading"))
}

/// Strong `ETag` derived from the snapshot content hash.
fn etag(countries: &CountriesState) -> [(HeaderName, String); 1] {
    [(header::ETAG, format!("\"{}\"", countries.content_hash))]
}

fn render_failed(err: std::fmt::Error) -> ApiError {
    error!("html render failed: {err}");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "render error")
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/status", get(get_status))
        .route("/api/globe", get(get_globe))
        .route("/api/points", get(get_points))
        .route("/api/options/:category", get(get_options))
        .route("/api/stats", get(get_stats))
        .route("/api/countries/:id/tooltip", get(get_tooltip))
        .route("/api/countries/:id/card", get(get_card))
        .route("/api/countries/:id/tooltip.html", get(get_tooltip_html))
        .route("/api/countries/:id/card.html", get(get_card_html))
        .route("/api/polygons", get(get_polygons))
        .route("/api/polygons/:index/card.html", get(get_polygon_card_html))
        .with_state(state)
}

pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub origin: &'static str,
    pub records: Option<usize>,
    pub languages: Option<usize>,
    pub features: Option<usize>,
    pub matched_features: Option<usize>,
    pub report: Option<NormalizeReport>,
    pub content_hash: Option<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusBody> {
    let countries = state.countries();
    let borders = state.borders();
    Json(StatusBody {
        origin: countries.as_ref().map_or("loading", |c| c.origin().as_str()),
        records: countries.as_ref().map(|c| c.snapshot().len()),
        languages: countries.as_ref().map(|c| c.snapshot().languages().len()),
        features: borders.as_ref().map(|b| b.len()),
        matched_features: borders.as_ref().map(|b| b.matched_count()),
        report: countries.as_ref().and_then(|c| c.report),
        content_hash: countries.as_ref().map(|c| c.content_hash.clone()),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobeBody {
    pub view: GlobeView,
    pub points: PointStyle,
    pub polygons: PolygonStyle,
}

pub async fn get_globe(State(state): State<AppState>) -> Json<GlobeBody> {
    Json(GlobeBody {
        view: state.globe.as_ref().clone(),
        points: state.points.style,
        polygons: state.polygons.style,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub value: Option<String>,
}

impl PointsParams {
    /// A category selection wins over free text when both are given.
    fn to_query(&self) -> Result<PointQuery, String> {
        match self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(category) => {
                let category: Category = category.parse()?;
                Ok(PointQuery::select(
                    category,
                    self.value.as_deref().unwrap_or_default(),
                ))
            }
            None => Ok(PointQuery::search(self.q.as_deref().unwrap_or_default())),
        }
    }
}

pub async fn get_points(
    State(state): State<AppState>,
    Query(params): Query<PointsParams>,
) -> ApiResult<([(HeaderName, String); 1], Json<PointsSnapshot>)> {
    let query = params
        .to_query()
        .map_err(|msg| api_error(StatusCode::BAD_REQUEST, msg))?;
    let countries = countries_or_503(&state)?;
    let ids = run_query(countries.snapshot(), &query);
    debug!(layer = state.points.name(), ?query, hits = ids.len(), "points query");
    let points = state.points.extract(countries.snapshot(), &ids);
    Ok((etag(&countries), Json(points)))
}

pub async fn get_options(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    let category: Category = category
        .parse()
        .map_err(|msg: String| api_error(StatusCode::BAD_REQUEST, msg))?;
    let countries = countries_or_503(&state)?;
    Ok(Json(menu_options(countries.snapshot(), category)))
}

pub async fn get_stats(
    State(state): State<AppState>,
) -> ApiResult<([(HeaderName, String); 1], Json<SnapshotStats>)> {
    let countries = countries_or_503(&state)?;
    Ok((etag(&countries), Json(countries.snapshot().stats())))
}

fn with_record<T>(
    state: &AppState,
    id: u32,
    f: impl FnOnce(&catalog::record::CountryRecord) -> T,
) -> ApiResult<T> {
    let countries = countries_or_503(state)?;
    countries
        .snapshot()
        .get(RecordId::new(id))
        .map(f)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("no country with id {id}")))
}

pub async fn get_tooltip(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<TooltipView>> {
    with_record(&state, id, tooltip_view).map(Json)
}

pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<CountryCardView>> {
    with_record(&state, id, card_view).map(Json)
}

pub async fn get_tooltip_html(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Html<String>> {
    let view = with_record(&state, id, tooltip_view)?;
    tooltip_html(&view).map(Html).map_err(render_failed)
}

pub async fn get_card_html(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Html<String>> {
    let view = with_record(&state, id, card_view)?;
    card_html(Some(&view)).map(Html).map_err(render_failed)
}

pub async fn get_polygons(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let countries = countries_or_503(&state)?;
    let borders = borders_or_503(&state)?;
    debug!(
        layer = state.polygons.name(),
        features = borders.len(),
        "polygons export"
    );
    Ok(Json(
        state
            .polygons
            .feature_collection(&borders, countries.snapshot()),
    ))
}

/// Card for the border feature at `index`; an empty body when the feature has
/// no matching country.
pub async fn get_polygon_card_html(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Html<String>> {
    let countries = countries_or_503(&state)?;
    let borders = borders_or_503(&state)?;
    let feature = borders
        .get(index)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("no polygon at index {index}")))?;
    let view = feature_card_view(countries.snapshot(), &feature);
    card_html(view.as_ref()).map(Html).map_err(render_failed)
}

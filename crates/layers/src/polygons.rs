use catalog::enrich::EnrichedBorders;
use catalog::snapshot::CountrySnapshot;
use foundation::color::Rgba;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::layer::Layer;
use crate::symbology::{TRANSPARENT, rgba_css};

/// Property added to each matched feature on export.
pub const COUNTRY_ID_KEY: &str = "countryId";
pub const COUNTRY_NAME_KEY: &str = "countryName";

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    #[serde(serialize_with = "rgba_css")]
    pub cap_color: Rgba,
    #[serde(serialize_with = "rgba_css")]
    pub side_color: Rgba,
    #[serde(serialize_with = "rgba_css")]
    pub stroke_color: Rgba,
    #[serde(serialize_with = "rgba_css")]
    pub hover_stroke_color: Rgba,
    pub altitude: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            cap_color: TRANSPARENT,
            side_color: TRANSPARENT,
            stroke_color: Rgba::new(255, 255, 255, 0.15),
            hover_stroke_color: Rgba::new(255, 255, 255, 0.9),
            altitude: 0.001,
        }
    }
}

impl PolygonStyle {
    /// Outline color for the feature at `index` given which one is hovered.
    pub fn stroke_color(&self, index: usize, hovered: Option<usize>) -> Rgba {
        if hovered == Some(index) {
            self.hover_stroke_color
        } else {
            self.stroke_color
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PolygonsLayer {
    pub style: PolygonStyle,
}

impl PolygonsLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// GeoJSON FeatureCollection of the borders, with matched features
    /// carrying the id and name of their country record.
    pub fn feature_collection(
        &self,
        borders: &EnrichedBorders,
        snapshot: &CountrySnapshot,
    ) -> Value {
        borders.borders().to_geojson_value_with(|index, _| {
            let mut properties = Map::new();
            if let Some(id) = borders.country_of(index)
                && let Some(record) = snapshot.get(id)
            {
                properties.insert(COUNTRY_ID_KEY.to_string(), Value::from(id.raw()));
                properties.insert(COUNTRY_NAME_KEY.to_string(), Value::from(record.name.clone()));
            }
            properties
        })
    }
}

impl Layer for PolygonsLayer {
    fn name(&self) -> &'static str {
        "polygons"
    }
}

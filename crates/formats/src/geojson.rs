//! Country border dataset (`datasets/geo-countries`): a GeoJSON
//! FeatureCollection of Polygon / MultiPolygon features.

use serde_json::{Map, Value};

use crate::error::FormatError;

/// Property keys carrying a feature's administrative name, in lookup order.
pub const ADMIN_NAME_KEYS: [&str; 2] = ["ADMIN", "name"];

#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PolygonGeometry {
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
}


#[derive(Debug, Clone, PartialEq)]
pub struct GeoPolygonFeature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: PolygonGeometry,
}

impl GeoPolygonFeature {
    /// Administrative name used for joining against country records.
    pub fn admin_name(&self) -> Option<&str> {
        ADMIN_NAME_KEYS
            .iter()
            .find_map(|key| self.properties.get(*key).and_then(Value::as_str))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorderCollection {
    pub features: Vec<GeoPolygonFeature>,
    /// Features dropped because their geometry was missing, malformed or not
    /// polygonal.
    pub skipped: usize,
}

impl BorderCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, FormatError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| FormatError::Json(e.to_string()))?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, FormatError> {
        let obj = value.as_object().ok_or(FormatError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FormatError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FormatError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(FormatError::NotAFeatureCollection)?;

        let mut out = Self {
            features: Vec::with_capacity(features_val.len()),
            skipped: 0,
        };
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val
                .as_object()
                .ok_or(FormatError::InvalidFeature {
                    index,
                    reason: "feature must be an object".to_string(),
                })?;

            let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
                FormatError::InvalidFeature {
                    index,
                    reason: "feature missing type".to_string(),
                },
            )?;
            if feat_type != "Feature" {
                return Err(FormatError::InvalidFeature {
                    index,
                    reason: format!("unexpected feature type: {feat_type}"),
                });
            }

            let id = match feat_obj.get("id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            let Some(geometry) = feat_obj.get("geometry").and_then(|g| parse_geometry(g).ok())
            else {
                out.skipped += 1;
                continue;
            };

            out.features.push(GeoPolygonFeature {
                id,
                properties,
                geometry,
            });
        }

        Ok(out)
    }

    /// Emits a GeoJSON FeatureCollection. `extra_properties` is called per
    /// feature (with its index) and its entries are merged over the feature's
    /// own properties.
    pub fn to_geojson_value_with<F>(&self, mut extra_properties: F) -> Value
    where
        F: FnMut(usize, &GeoPolygonFeature) -> Map<String, Value>,
    {
        let mut root = Map::new();
        root.insert(
            "type".to_string(),
            Value::String("FeatureCollection".to_string()),
        );

        let mut features: Vec<Value> = Vec::with_capacity(self.features.len());
        for (index, feat) in self.features.iter().enumerate() {
            let mut fobj = Map::new();
            fobj.insert("type".to_string(), Value::String("Feature".to_string()));
            if let Some(id) = &feat.id {
                fobj.insert("id".to_string(), Value::String(id.clone()));
            }

            let mut properties = feat.properties.clone();
            properties.extend(extra_properties(index, feat));
            fobj.insert("properties".to_string(), Value::Object(properties));

            fobj.insert(
                "geometry".to_string(),
                geometry_to_geojson_value(&feat.geometry),
            );
            features.push(Value::Object(fobj));
        }

        root.insert("features".to_string(), Value::Array(features));
        Value::Object(root)
    }

    pub fn to_geojson_value(&self) -> Value {
        self.to_geojson_value_with(|_, _| Map::new())
    }
}

fn geometry_to_geojson_value(geom: &PolygonGeometry) -> Value {
    let mut obj = Map::new();
    match geom {
        PolygonGeometry::Polygon(rings) => {
            obj.insert("type".to_string(), Value::String("Polygon".to_string()));
            obj.insert("coordinates".to_string(), rings_value(rings));
        }
        PolygonGeometry::MultiPolygon(polys) => {
            obj.insert(
                "type".to_string(),
                Value::String("MultiPolygon".to_string()),
            );
            let coords = polys.iter().map(|poly| rings_value(poly)).collect();
            obj.insert("coordinates".to_string(), Value::Array(coords));
        }
    }
    Value::Object(obj)
}

fn rings_value(rings: &[Vec<GeoPoint>]) -> Value {
    Value::Array(
        rings
            .iter()
            .map(|ring| Value::Array(ring.iter().map(point_coords).collect()))
            .collect(),
    )
}

fn point_coords(p: &GeoPoint) -> Value {
    Value::Array(vec![Value::from(p.lon_deg), Value::from(p.lat_deg)])
}

fn parse_geometry(value: &Value) -> Result<PolygonGeometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok(PolygonGeometry::Polygon(parse_polygon(coords)?)),
        "MultiPolygon" => Ok(PolygonGeometry::MultiPolygon(parse_multi_polygon(
            coords,
        )?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_point(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_point(item)?);
    }
    Ok(out)
}

fn parse_polygon(coords: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_ring(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Vec<GeoPoint>>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_polygon(poly)?);
    }
    Ok(out)
}

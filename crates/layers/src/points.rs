use catalog::snapshot::CountrySnapshot;
use foundation::color::Rgb;
use foundation::ids::RecordId;
use serde::Serialize;

use crate::layer::Layer;
use crate::symbology::rgb_hex;

/// Shared look of every country point.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointStyle {
    /// Height above the surface as a fraction of globe radius.
    pub altitude: f64,
    pub radius: f64,
    pub merge: bool,
    pub transition_ms: u32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            altitude: 0.01,
            radius: 0.2,
            merge: true,
            transition_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDatum {
    pub id: u32,
    pub lat: f64,
    pub lng: f64,
    #[serde(serialize_with = "rgb_hex")]
    pub color: Rgb,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsSnapshot {
    pub style: PointStyle,
    pub points: Vec<PointDatum>,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PointsLayer {
    pub style: PointStyle,
}

impl PointsLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point data for `ids`, in the given order. Ids the snapshot does not
    /// hold are skipped.
    pub fn extract(&self, snapshot: &CountrySnapshot, ids: &[RecordId]) -> PointsSnapshot {
        let points = ids
            .iter()
            .filter_map(|&id| {
                let record = snapshot.get(id)?;
                Some(PointDatum {
                    id: id.raw(),
                    lat: record.coordinates.lat_deg,
                    lng: record.coordinates.lng_deg,
                    color: record.display_color(),
                    name: record.name.clone(),
                })
            })
            .collect();
        PointsSnapshot {
            style: self.style,
            points,
        }
    }
}

impl Layer for PointsLayer {
    fn name(&self) -> &'static str {
        "points"
    }
}

#[cfg(test)]
mod tests {
    use super::{PointStyle, PointsLayer};
    use catalog::record::CountryRecord;
    use catalog::snapshot::CountrySnapshot;
    use foundation::coords::LatLng;
    use foundation::ids::RecordId;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn extracts_selected_records_with_colors() {
        let snapshot = CountrySnapshot::new(vec![
            CountryRecord {
                languages: vec!["French".to_string()],
                ..CountryRecord::new("France", "French Republic", LatLng::new(46.0, 2.0))
            },
            CountryRecord::new("Nowhere", "Nowhere", LatLng::new(0.0, 0.0)),
        ]);
        let out = PointsLayer::new().extract(
            &snapshot,
            &[RecordId::new(1), RecordId::new(0), RecordId::new(9)],
        );
        assert_eq!(out.points.len(), 2);
        assert_eq!(out.points[0].name, "Nowhere");
        assert_eq!(out.points[0].color.to_hex(), "#9aa0a6");
        assert_eq!(
            serde_json::to_value(&out.points[1]).expect("json"),
            json!({"id": 0, "lat": 46.0, "lng": 2.0, "color": "#e8eaed", "name": "France"})
        );
    }

    #[test]
    fn default_style() {
        assert_eq!(
            serde_json::to_value(PointStyle::default()).expect("json"),
            json!({"altitude": 0.01, "radius": 0.2, "merge": true, "transitionMs": 1000})
        );
    }
}

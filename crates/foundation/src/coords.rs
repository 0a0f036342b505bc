/// Geographic position in degrees, latitude first (the order used by the
/// country-facts API and by the globe's point accessors).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LatLng {
    #[cfg_attr(feature = "serde", serde(rename = "lat"))]
    pub lat_deg: f64,
    #[cfg_attr(feature = "serde", serde(rename = "lng"))]
    pub lng_deg: f64,
}

impl LatLng {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }

    /// Builds a position from a raw `[lat, lng]` list.
    ///
    /// Anything other than exactly two finite numbers yields `None`.
    pub fn from_pair(pair: &[f64]) -> Option<Self> {
        let [lat, lng] = pair else {
            return None;
        };
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        Some(Self::new(*lat, *lng))
    }

    pub fn is_finite(&self) -> bool {
        self.lat_deg.is_finite() && self.lng_deg.is_finite()
    }
}

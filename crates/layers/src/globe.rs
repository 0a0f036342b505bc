use foundation::color::Rgb;
use serde::Serialize;

use crate::symbology::rgb_hex;

pub const EARTH_IMAGE_URL: &str = "https://unpkg.com/three-globe/example/img/earth-dark.jpg";
pub const BUMP_IMAGE_URL: &str = "https://unpkg.com/three-globe/example/img/earth-topology.png";
pub const BACKGROUND_IMAGE_URL: &str = "https://unpkg.com/three-globe/example/img/night-sky.png";

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfView {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

/// Camera and scene settings for the globe page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobeView {
    pub globe_image_url: String,
    pub bump_image_url: String,
    pub background_image_url: String,
    #[serde(serialize_with = "rgb_hex")]
    pub atmosphere_color: Rgb,
    pub atmosphere_altitude: f64,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub initial_view: PointOfView,
}

impl Default for GlobeView {
    fn default() -> Self {
        Self {
            globe_image_url: EARTH_IMAGE_URL.to_string(),
            bump_image_url: BUMP_IMAGE_URL.to_string(),
            background_image_url: BACKGROUND_IMAGE_URL.to_string(),
            atmosphere_color: Rgb::new(0x1a, 0x73, 0xe8),
            atmosphere_altitude: 0.15,
            auto_rotate: true,
            auto_rotate_speed: 0.3,
            min_distance: 200.0,
            max_distance: 600.0,
            initial_view: PointOfView {
                lat: 20.0,
                lng: 0.0,
                altitude: 2.5,
            },
        }
    }
}

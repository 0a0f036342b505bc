//! Serde adapters that render colors the way globe clients expect them.

use foundation::color::{Rgb, Rgba};
use serde::Serializer;

/// Fully transparent fill.
pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

pub fn rgb_hex<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&color.to_hex())
}

pub fn rgba_css<S: Serializer>(color: &Rgba, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&color.to_css())
}

#[cfg(test)]
mod tests {
    use super::{TRANSPARENT, rgb_hex, rgba_css};
    use foundation::color::{Rgb, Rgba};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Swatch {
        #[serde(serialize_with = "rgb_hex")]
        fill: Rgb,
        #[serde(serialize_with = "rgba_css")]
        stroke: Rgba,
    }

    #[test]
    fn colors_serialize_as_css_strings() {
        let swatch = Swatch {
            fill: Rgb::new(0x1a, 0x73, 0xe8),
            stroke: Rgba::new(255, 255, 255, 0.15),
        };
        assert_eq!(
            serde_json::to_value(&swatch).expect("json"),
            json!({"fill": "#1a73e8", "stroke": "rgba(255, 255, 255, 0.15)"})
        );
        assert_eq!(TRANSPARENT.to_css(), "rgba(0, 0, 0, 0)");
    }
}

/// 8-bit sRGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// sRGB color with a fractional alpha, rendered as a CSS `rgba()` string.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            rgb: Rgb::new(r, g, b),
            alpha,
        }
    }

    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Rgb, Rgba};

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(Rgb::new(0x1a, 0x73, 0xe8).to_hex(), "#1a73e8");
        assert_eq!(Rgb::new(0, 5, 255).to_hex(), "#0005ff");
    }

    #[test]
    fn rgba_css() {
        assert_eq!(
            Rgba::new(255, 255, 255, 0.15).to_css(),
            "rgba(255, 255, 255, 0.15)"
        );
        assert_eq!(Rgba::new(0, 0, 0, 0.0).to_css(), "rgba(0, 0, 0, 0)");
    }
}

use foundation::color::Rgb;

pub const NO_LANGUAGE_COLOR: Rgb = Rgb::new(0x9a, 0xa0, 0xa6);
pub const SINGLE_LANGUAGE_COLOR: Rgb = Rgb::new(0xe8, 0xea, 0xed);
pub const DEEPEST_DIVERSITY_COLOR: Rgb = Rgb::new(0x1a, 0x73, 0xe8);

/// Point color for a country speaking `count` languages.
///
/// Steps: 0 gray, 1 near-white, 2 light blue, then 3–4, 5–7, 8–12 and 13+
/// in progressively deeper blues.
pub fn color_for_language_count(count: usize) -> Rgb {
    match count {
        0 => NO_LANGUAGE_COLOR,
        1 => SINGLE_LANGUAGE_COLOR,
        2 => Rgb::new(0xae, 0xcb, 0xfa),
        3..=4 => Rgb::new(0x8a, 0xb4, 0xf8),
        5..=7 => Rgb::new(0x66, 0x9d, 0xf6),
        8..=12 => Rgb::new(0x42, 0x85, 0xf4),
        _ => DEEPEST_DIVERSITY_COLOR,
    }
}

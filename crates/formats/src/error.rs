#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    Json(String),
    NotAnArray,
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Json(msg) => write!(f, "JSON parse error: {msg}"),
            FormatError::NotAnArray => write!(f, "expected a JSON array of countries"),
            FormatError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            FormatError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

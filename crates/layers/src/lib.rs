pub mod globe;
pub mod labels;
pub mod layer;
pub mod points;
pub mod polygons;
pub mod query;
pub mod symbology;

pub use layer::*;

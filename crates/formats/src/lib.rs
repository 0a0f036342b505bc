pub mod countries;
pub mod error;
pub mod geojson;

pub use countries::*;
pub use error::*;
pub use geojson::*;

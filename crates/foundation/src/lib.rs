pub mod color;
pub mod coords;
pub mod ids;

// Foundation crate: small, well-tested primitives only.
pub use color::*;
pub use coords::*;
pub use ids::*;

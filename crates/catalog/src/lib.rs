pub mod enrich;
pub mod fallback;
pub mod normalize;
pub mod palette;
pub mod record;
pub mod snapshot;
pub mod stats;

pub use enrich::*;
pub use fallback::*;
pub use normalize::*;
pub use palette::*;
pub use record::*;
pub use snapshot::*;
pub use stats::*;

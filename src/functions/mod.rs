pub mod frame;
pub mod indicators;
pub mod primitives;
pub mod registry;
pub mod signals;
pub mod traits;

pub use registry::IndicatorRegistry;
pub use traits::{IndicatorOutputs, Transform};

pub mod methods;
pub mod registry;

pub use registry::{lookup, SignalFn};

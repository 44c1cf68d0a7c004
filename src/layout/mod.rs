pub mod grid;
pub mod legend;
pub mod resolver;

pub use resolver::{resolve_layout, ResolvedGrid};

pub mod axes;
pub mod data_series;
pub mod graph_state;
pub mod labels;
pub mod session;
pub mod size;
pub mod visibility;

pub use session::{PlotSession, SessionConfig};

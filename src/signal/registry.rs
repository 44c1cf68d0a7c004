use crate::data::LogData;
use crate::error::SignalError;
use crate::signal::methods;
use crate::state::graph_state::GraphCell;

/// Fixed contract shared by every plot function:
/// `(cell, times, data, logs, log_cols, cur_col, label, legend_index)`.
///
/// `times` already carries any x-offset. A function adds one or more series
/// to `cell` or reports why it could not.
pub type SignalFn = fn(
    &mut GraphCell,
    &[f64],
    &LogData,
    &[String],
    &[usize],
    usize,
    &str,
    usize,
) -> Result<(), SignalError>;

const REGISTRY: &[(&str, SignalFn)] = &[
    ("normal", methods::normal),
    ("plot_inverse", methods::plot_inverse),
    ("plot_rad2deg", methods::plot_rad2deg),
    ("plot_diff", methods::plot_diff),
    ("plot_rad2deg_diff", methods::plot_rad2deg_diff),
    ("plot_joint_velocity", methods::plot_joint_velocity),
    ("plot_watt", methods::plot_watt),
    ("plot_norm", methods::plot_norm),
    ("plot_time", methods::plot_time),
];

/// Look up a plot function by its config name.
pub fn lookup(name: &str) -> Option<SignalFn> {
    REGISTRY.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

//! Plot functions selectable from the plot config by name.
//!
//! Every function has the `SignalFn` shape even when it ignores some arguments.

use crate::data::LogData;
use crate::error::SignalError;
use crate::state::data_series::DataSeries;
use crate::state::graph_state::GraphCell;

fn expect_refs(logs: &[String], log_cols: &[usize], expected: usize) -> Result<(), SignalError> {
    let got = logs.len().min(log_cols.len());
    if logs.len() != log_cols.len() || got < expected {
        return Err(SignalError::ArgumentShape { expected, got });
    }
    Ok(())
}

/// Fetch value column `log_col` of `log`, checked against the time axis length.
fn column(data: &LogData, log: &str, log_col: usize, times: &[f64]) -> Result<Vec<f64>, SignalError> {
    let table = data
        .topic(log)
        .ok_or_else(|| SignalError::MissingTopic(log.to_string()))?;
    let values = table
        .value_column(log_col)
        .ok_or_else(|| SignalError::ColumnOutOfRange {
            log: log.to_string(),
            column: log_col,
            width: table.value_width(),
        })?;
    if values.len() != times.len() {
        return Err(SignalError::LengthMismatch {
            values: values.len(),
            times: times.len(),
        });
    }
    Ok(values)
}

/// Backward difference `dv/dt`, one sample shorter than the input.
fn derivative(times: &[f64], values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    times
        .windows(2)
        .zip(values.windows(2))
        .map(|(t, v)| {
            let dt = t[1] - t[0];
            let d = if dt != 0.0 { (v[1] - v[0]) / dt } else { f64::NAN };
            (t[1], d)
        })
        .unzip()
}

#[allow(clippy::too_many_arguments)]
fn single<F>(
    cell: &mut GraphCell,
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
    label: &str,
    legend_index: usize,
    f: F,
) -> Result<(), SignalError>
where
    F: Fn(f64) -> f64,
{
    expect_refs(logs, log_cols, 1)?;
    let y = column(data, &logs[0], log_cols[0], times)?;
    let y = y.into_iter().map(f).collect();
    cell.add_series(DataSeries::for_legend(label, times.to_vec(), y, legend_index));
    Ok(())
}

/// Raw value.
#[allow(clippy::too_many_arguments)]
pub fn normal(
    cell: &mut GraphCell,
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
    _cur_col: usize,
    label: &str,
    legend_index: usize,
) -> Result<(), SignalError> {
    single(cell, times, data, logs, log_cols, label, legend_index, |v| v)
}

#[allow(clippy::too_many_arguments)]
pub fn plot_inverse(
    cell: &mut GraphCell,
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
    _cur_col: usize,
    label: &str,
    legend_index: usize,
) -> Result<(), SignalError> {
    single(cell, times, data, logs, log_cols, label, legend_index, |v| -v)
}

/// Radians to degrees.
#[allow(clippy::too_many_arguments)]
pub fn plot_rad2deg(
    cell: &mut GraphCell,
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
    _cur_col: usize,
    label: &str,
    legend_index: usize,
) -> Result<(), SignalError> {
    single(cell, times, data, logs, log_cols, label, legend_index, f64::to_degrees)
}

fn difference(
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
) -> Result<Vec<f64>, SignalError> {
    expect_refs(logs, log_cols, 2)?;
    let a = column(data, &logs[0], log_cols[0], times)?;
    let b = column(data, &logs[1], log_cols[1], times)?;
    Ok(a.iter().zip(&b).map(|(a, b)| a - b).collect())
}

/// First reference minus second reference.
#[allow(clippy::too_many_arguments)]
pub fn plot_diff(
    cell: &mut GraphCell,
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
    _cur_col: usize,
    label: &str,
    legend_index: usize,
) -> Result<(), SignalError> {
    let y = difference(times, data, logs, log_cols)?;
    cell.add_series(DataSeries::for_legend(label, times.to_vec(), y, legend_index));
    Ok(())
}

/// Tracking error in degrees, e.g. reference angle minus measured angle.
#[allow(clippy::too_many_arguments)]
pub fn plot_rad2deg_diff(
    cell: &mut GraphCell,
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
    _cur_col: usize,
    label: &str,
    legend_index: usize,
) -> Result<(), SignalError> {
    let y = difference(times, data, logs, log_cols)?
        .into_iter()
        .map(f64::to_degrees)
        .collect();
    cell.add_series(DataSeries::for_legend(label, times.to_vec(), y, legend_index));
    Ok(())
}

/// Angular velocity in deg/s from a joint angle in radians.
#[allow(clippy::too_many_arguments)]
pub fn plot_joint_velocity(
    cell: &mut GraphCell,
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
    _cur_col: usize,
    label: &str,
    legend_index: usize,
) -> Result<(), SignalError> {
    expect_refs(logs, log_cols, 1)?;
    let q = column(data, &logs[0], log_cols[0], times)?;
    let (x, vel) = derivative(times, &q);
    let y = vel.into_iter().map(f64::to_degrees).collect();
    cell.add_series(DataSeries::for_legend(label, x, y, legend_index));
    Ok(())
}

/// Joint power: velocity of the first reference (rad) times torque of the second.
#[allow(clippy::too_many_arguments)]
pub fn plot_watt(
    cell: &mut GraphCell,
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
    _cur_col: usize,
    label: &str,
    legend_index: usize,
) -> Result<(), SignalError> {
    expect_refs(logs, log_cols, 2)?;
    let q = column(data, &logs[0], log_cols[0], times)?;
    let tau = column(data, &logs[1], log_cols[1], times)?;
    let (x, vel) = derivative(times, &q);
    let y = vel.iter().zip(tau.iter().skip(1)).map(|(v, t)| v * t).collect();
    cell.add_series(DataSeries::for_legend(label, x, y, legend_index));
    Ok(())
}

/// Euclidean norm across all references.
#[allow(clippy::too_many_arguments)]
pub fn plot_norm(
    cell: &mut GraphCell,
    times: &[f64],
    data: &LogData,
    logs: &[String],
    log_cols: &[usize],
    _cur_col: usize,
    label: &str,
    legend_index: usize,
) -> Result<(), SignalError> {
    expect_refs(logs, log_cols, 1)?;
    let mut sum = vec![0.0; times.len()];
    for (log, &col) in logs.iter().zip(log_cols) {
        let v = column(data, log, col, times)?;
        for (s, v) in sum.iter_mut().zip(v) {
            *s += v * v;
        }
    }
    let y = sum.into_iter().map(f64::sqrt).collect();
    cell.add_series(DataSeries::for_legend(label, times.to_vec(), y, legend_index));
    Ok(())
}

/// Sampling interval of the log, for spotting dropped cycles.
#[allow(clippy::too_many_arguments)]
pub fn plot_time(
    cell: &mut GraphCell,
    times: &[f64],
    _data: &LogData,
    _logs: &[String],
    _log_cols: &[usize],
    _cur_col: usize,
    label: &str,
    legend_index: usize,
) -> Result<(), SignalError> {
    let (x, y) = times.windows(2).map(|t| (t[1], t[1] - t[0])).unzip();
    cell.add_series(DataSeries::for_legend(label, x, y, legend_index));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::topic::TopicTable;

    fn data() -> LogData {
        let mut d = LogData::default();
        let q = TopicTable::from_rows(vec![
            vec![0.0, 0.0, 1.0],
            vec![0.5, std::f64::consts::PI, 2.0],
            vec![1.0, std::f64::consts::PI, 4.0],
        ])
        .unwrap();
        let tau = TopicTable::from_rows(vec![vec![0.0, 1.0], vec![0.5, 2.0], vec![1.0, 3.0]]).unwrap();
        d.topics.insert("q".into(), Some(q));
        d.topics.insert("tau".into(), Some(tau));
        d.topics.insert("absent".into(), None);
        d
    }

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    const T: [f64; 3] = [0.0, 0.5, 1.0];

    #[test]
    fn rad2deg_converts_and_labels() {
        let mut cell = GraphCell::new(0, 0, "c".into());
        plot_rad2deg(&mut cell, &T, &data(), &s(&["q"]), &[0], 0, "q_0", 1).unwrap();
        let series = &cell.series[0];
        assert_eq!(series.label, "q_0");
        assert!((series.y[1] - 180.0).abs() < 1e-9);
        assert_eq!(series.color, crate::state::data_series::color_for_index(1));
    }

    #[test]
    fn diff_needs_two_references() {
        let mut cell = GraphCell::new(0, 0, "c".into());
        let err = plot_diff(&mut cell, &T, &data(), &s(&["q"]), &[0], 0, "d", 0).unwrap_err();
        assert_eq!(err, SignalError::ArgumentShape { expected: 2, got: 1 });
        plot_diff(&mut cell, &T, &data(), &s(&["q", "tau"]), &[1, 0], 0, "d", 0).unwrap();
        assert_eq!(cell.series[0].y, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn velocity_and_watt_drop_first_sample() {
        let mut cell = GraphCell::new(0, 0, "c".into());
        plot_watt(&mut cell, &T, &data(), &s(&["q", "tau"]), &[1, 0], 0, "w", 0).unwrap();
        assert_eq!(cell.series[0].x, vec![0.5, 1.0]);
        // q: 1,2,4 -> vel 2,4 ; tau 2,3
        assert_eq!(cell.series[0].y, vec![4.0, 12.0]);
    }

    #[test]
    fn missing_topic_and_column_are_reported() {
        let mut cell = GraphCell::new(0, 0, "c".into());
        assert_eq!(
            normal(&mut cell, &T, &data(), &s(&["absent"]), &[0], 0, "a", 0),
            Err(SignalError::MissingTopic("absent".into()))
        );
        assert!(matches!(
            normal(&mut cell, &T, &data(), &s(&["q"]), &[5], 0, "a", 0),
            Err(SignalError::ColumnOutOfRange { column: 5, width: 2, .. })
        ));
        assert!(cell.series.is_empty());
    }

    #[test]
    fn length_mismatch_is_reported() {
        let mut cell = GraphCell::new(0, 0, "c".into());
        let short = [0.0, 0.5];
        assert!(matches!(
            normal(&mut cell, &short, &data(), &s(&["q"]), &[0], 0, "a", 0),
            Err(SignalError::LengthMismatch { values: 3, times: 2 })
        ));
    }

    #[test]
    fn norm_and_time() {
        let mut cell = GraphCell::new(0, 0, "c".into());
        plot_norm(&mut cell, &T, &data(), &s(&["q", "tau"]), &[1, 0], 0, "n", 0).unwrap();
        assert!((cell.series[0].y[0] - 2f64.sqrt()).abs() < 1e-12);
        plot_time(&mut cell, &T, &data(), &[], &[], 0, "dt", 1).unwrap();
        assert_eq!(cell.series[1].y, vec![0.5, 0.5]);
    }
}

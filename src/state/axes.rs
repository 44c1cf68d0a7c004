use crate::config::{AxisRange, LayoutGroup};
use crate::error::ConfigError;
use crate::state::graph_state::AxisState;

/// Resolved x axis of a cell: bounds and the offset applied to the time column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct XAxisPlan {
    pub axis: AxisState,
    pub offset: f64,
}

/// Resolve an xRange. With `zero`, the axis is shifted so `min` lands on 0,
/// which needs an explicit `min`.
pub fn resolve_x_range(range: &AxisRange, graph: &str, label: &str) -> Result<XAxisPlan, ConfigError> {
    if !range.zero {
        return Ok(XAxisPlan {
            axis: AxisState { min: range.min, max: range.max },
            offset: 0.0,
        });
    }
    let min = range.min.ok_or_else(|| ConfigError::ZeroWithoutMin {
        graph: graph.to_string(),
        label: label.to_string(),
    })?;
    Ok(XAxisPlan {
        axis: AxisState {
            min: Some(0.0),
            max: range.max.map(|max| max - min),
        },
        offset: -min,
    })
}

/// x axis plan for a group, autoranged when it has no xRange.
pub fn x_plan(group: &LayoutGroup, graph: &str, label: &str) -> Result<XAxisPlan, ConfigError> {
    match &group.x_range {
        Some(range) => resolve_x_range(range, graph, label),
        None => Ok(XAxisPlan::default()),
    }
}

pub fn y_axis(group: &LayoutGroup) -> AxisState {
    group
        .y_range
        .map(|r| AxisState { min: r.min, max: r.max })
        .unwrap_or_default()
}

/// Time axes are linked across the whole grid unless some group pins its own xRange.
pub fn link_x_axes<'a>(groups: impl IntoIterator<Item = &'a LayoutGroup>) -> bool {
    !groups.into_iter().any(|g| g.x_range.is_some())
}

/// Concrete bounds to show for an axis, filling unset sides from the data.
/// `None` leaves the axis to the renderer's autorange.
pub fn effective_bounds(axis: AxisState, data: Option<(f64, f64)>) -> Option<(f64, f64)> {
    if axis.is_auto() {
        return None;
    }
    let (data_min, data_max) = data.unwrap_or((0.0, 1.0));
    let min = axis.min.unwrap_or(data_min);
    let max = axis.max.unwrap_or(data_max);
    (min < max).then_some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: Option<f64>, max: Option<f64>, zero: bool) -> AxisRange {
        AxisRange { min, max, zero }
    }

    #[test]
    fn zero_shifts_range_to_origin() {
        let plan = resolve_x_range(&range(Some(10.0), Some(25.0), true), "g", "l").unwrap();
        assert_eq!(plan.axis, AxisState { min: Some(0.0), max: Some(15.0) });
        assert_eq!(plan.offset, -10.0);
    }

    #[test]
    fn zero_without_min_names_graph_and_label() {
        let err = resolve_x_range(&range(None, Some(25.0), true), "joint_angle 0", "rh_q_0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroWithoutMin { .. }));
        assert_eq!(
            err.to_string(),
            "[joint_angle 0/rh_q_0] please set xRange/min to use xRange/zero option"
        );
    }

    #[test]
    fn plain_range_passes_through() {
        let plan = resolve_x_range(&range(Some(1.0), None, false), "g", "l").unwrap();
        assert_eq!(plan.axis, AxisState { min: Some(1.0), max: None });
        assert_eq!(plan.offset, 0.0);
    }

    #[test]
    fn partial_bounds_fill_from_data() {
        let data = Some((2.0, 8.0));
        assert_eq!(effective_bounds(AxisState::default(), data), None);
        assert_eq!(effective_bounds(AxisState { min: Some(0.0), max: None }, data), Some((0.0, 8.0)));
        assert_eq!(effective_bounds(AxisState { min: None, max: Some(5.0) }, data), Some((2.0, 5.0)));
        assert_eq!(effective_bounds(AxisState { min: Some(9.0), max: None }, data), None);
    }

    #[test]
    fn linking_stops_when_any_group_has_x_range() {
        let a: LayoutGroup = serde_json::from_str(r#"{"legends": []}"#).unwrap();
        let mut b = a.clone();
        assert!(link_x_axes([&a, &b]));
        b.x_range = Some(range(Some(0.0), Some(1.0), false));
        assert!(!link_x_axes([&a, &b]));
        assert!(y_axis(&a).is_auto());
    }
}

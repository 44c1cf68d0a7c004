use std::sync::Arc;
use crate::config::{LayoutGroup, PlotConfig, StyleHints};
use crate::error::ResolveError;
use crate::signal::{self, SignalFn};

/// One data reference after the legend id has picked its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    pub log: String,
    pub column: usize,
}

/// Binding of one legend in one grid cell.
#[derive(Debug, Clone)]
pub struct GraphLegendInfo {
    pub sub_column: usize,
    pub legend_index: usize,
    pub func_name: String,
    pub func: SignalFn,
    pub data: Vec<ResolvedRef>,
    pub label: String,
    pub style: StyleHints,
}

impl GraphLegendInfo {
    pub fn logs(&self) -> Vec<String> {
        self.data.iter().map(|d| d.log.clone()).collect()
    }

    pub fn log_cols(&self) -> Vec<usize> {
        self.data.iter().map(|d| d.column).collect()
    }
}

/// Title of sub-column `sub_column` of `group`.
pub fn graph_title(group: &LayoutGroup, sub_column: usize) -> String {
    if group.sub_columns() == 1 {
        group.name.clone()
    } else {
        format!("{} {}", group.name, sub_column)
    }
}

/// Resolve slot (group, sub-column, legend) against the plot config.
pub fn resolve_legend(
    groups: &[Arc<LayoutGroup>],
    plot: &PlotConfig,
    group_index: usize,
    sub_column: usize,
    legend_index: usize,
) -> Result<GraphLegendInfo, ResolveError> {
    let slot_err = ResolveError::SlotOutOfRange {
        group: group_index,
        legend: legend_index,
    };
    let group = groups.get(group_index).ok_or(slot_err.clone())?;
    let legend = group.legends.get(legend_index).ok_or(slot_err)?;

    let spec = plot
        .get(&legend.key)
        .ok_or_else(|| ResolveError::MissingPlot(legend.key.clone()))?;
    let id = *legend
        .id
        .get(sub_column)
        .ok_or_else(|| ResolveError::SubColumnOutOfRange {
            key: legend.key.clone(),
            sub_column,
            len: legend.id.len(),
        })?;

    let data = spec
        .data
        .iter()
        .map(|src| {
            src.column
                .get(id)
                .map(|&column| ResolvedRef {
                    log: src.log.clone(),
                    column,
                })
                .ok_or_else(|| ResolveError::ColumnOutOfRange {
                    key: legend.key.clone(),
                    log: src.log.clone(),
                    id,
                    len: src.column.len(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let func = signal::lookup(&spec.func).ok_or_else(|| ResolveError::UnknownFunction(spec.func.clone()))?;

    let label = match (&legend.label, &spec.label) {
        (Some(label), _) => label.clone(),
        (None, Some(prefix)) => format!("{prefix}_{id}"),
        (None, None) => format!("{}_{id}", legend.key),
    };

    Ok(GraphLegendInfo {
        sub_column,
        legend_index,
        func_name: spec.func.clone(),
        func,
        data,
        label,
        style: spec.style.clone(),
    })
}

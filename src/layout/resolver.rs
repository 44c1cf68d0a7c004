use std::sync::Arc;
use crate::config::{LayoutConfig, LayoutGroup, PlotConfig};
use crate::diagnostics::{Diagnostic, Stage};
use crate::layout::grid::{build_grid, GridGeometry};
use crate::layout::legend::{graph_title, resolve_legend, GraphLegendInfo};

/// One grid cell: position, owning group and the legends that resolved.
#[derive(Debug, Clone)]
pub struct ResolvedCell {
    pub row: usize,
    pub col: usize,
    pub group: Arc<LayoutGroup>,
    pub title: String,
    pub legends: Vec<GraphLegendInfo>,
}

/// Output of the layout step. Cells are row-major, legends in layout order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedGrid {
    pub geometry: GridGeometry,
    pub cells: Vec<ResolvedCell>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Bind every (group, sub-column, legend) slot of `layout` against `plot`.
///
/// A slot that fails to resolve is reported and left out; its cell is still
/// created so the grid shape never depends on plot config mistakes.
pub fn resolve_layout(layout: &LayoutConfig, plot: &PlotConfig) -> ResolvedGrid {
    let groups: Vec<Arc<LayoutGroup>> = layout.groups.iter().cloned().map(Arc::new).collect();
    let geometry = build_grid(groups.iter().map(|g| g.as_ref()));

    let mut cells = Vec::with_capacity(geometry.cells.len());
    let mut diagnostics = Vec::new();

    for pos in &geometry.cells {
        let group = &groups[pos.group];
        let mut legends = Vec::with_capacity(group.legends.len());
        for k in 0..group.legends.len() {
            match resolve_legend(&groups, plot, pos.group, pos.sub_column, k) {
                Ok(info) => legends.push(info),
                Err(e) => diagnostics.push(Diagnostic::report(
                    Stage::Layout,
                    pos.row,
                    pos.col,
                    format!("(i,j,k)=({}, {}, {}): {e}", pos.group, pos.sub_column, k),
                )),
            }
        }
        cells.push(ResolvedCell {
            row: pos.row,
            col: pos.col,
            group: Arc::clone(group),
            title: graph_title(group, pos.sub_column),
            legends,
        });
    }

    ResolvedGrid {
        geometry,
        cells,
        diagnostics,
    }
}

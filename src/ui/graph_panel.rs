use eframe::egui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotBounds, PlotPoints};
use crate::config::LineKind;
use crate::processing::downsampling;
use crate::state::axes;
use crate::state::graph_state::GraphCell;
use crate::state::session::PlotSession;
use crate::state::visibility::VisibilityAction;

/// Drawn points for every series of every cell, in session order.
pub type SessionPoints = Vec<Vec<Vec<[f64; 2]>>>;

const MIN_CELL_WIDTH: f32 = 150.0;
const MIN_CELL_HEIGHT: f32 = 120.0;
const MAX_CELL_SIZE: f32 = 4000.0;

/// Requests a cell makes to the parent from its context menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphAction {
    Visibility(VisibilityAction),
    /// Fix the cell to `width` x `height` pixels.
    Resize { row: usize, col: usize, width: f32, height: f32 },
}

/// Apply each cell's downsampling hint once, up front.
pub fn prepare_points(session: &PlotSession) -> SessionPoints {
    session.cells.iter().map(cell_points).collect()
}

fn cell_points(cell: &GraphCell) -> Vec<Vec<[f64; 2]>> {
    cell.series
        .iter()
        .map(|s| {
            let (x, y) = match &cell.downsampling {
                Some(policy) => downsampling::downsample(&s.x, &s.y, policy),
                None => (s.x.clone(), s.y.clone()),
            };
            x.into_iter().zip(y).map(|(x, y)| [x, y]).collect()
        })
        .collect()
}

fn line_style(kind: LineKind) -> LineStyle {
    match kind {
        LineKind::Solid => LineStyle::Solid,
        LineKind::Dash => LineStyle::dashed_loose(),
        LineKind::Dot => LineStyle::dotted_dense(),
        LineKind::DashDot => LineStyle::dashed_dense(),
    }
}

/// Split `total` among slots: fixed slots keep their size, the rest share
/// what is left evenly (never below `min`).
pub fn share(total: f32, fixed: &[Option<f32>], spacing: f32, min: f32) -> Vec<f32> {
    let gaps = spacing * fixed.len().saturating_sub(1) as f32;
    let taken: f32 = fixed.iter().flatten().sum();
    let free = fixed.iter().filter(|f| f.is_none()).count();
    let each = if free == 0 {
        0.0
    } else {
        ((total - taken - gaps) / free as f32).max(min)
    };
    fixed.iter().map(|f| f.unwrap_or(each)).collect()
}

/// Bounds to force on the plot, or `None` to let it autorange.
/// Once one axis is pinned, the other is taken from the data, or `[0, 1]`
/// when the cell has none.
fn forced_bounds(cell: &GraphCell) -> Option<PlotBounds> {
    let x = axes::effective_bounds(cell.x_axis, cell.x_range());
    let y = axes::effective_bounds(cell.y_axis, cell.y_range());
    if x.is_none() && y.is_none() {
        return None;
    }
    let (x0, x1) = x.or_else(|| cell.x_range()).unwrap_or((0.0, 1.0));
    let (y0, y1) = y
        .or_else(|| cell.y_range().map(|(lo, hi)| pad(lo, hi)))
        .unwrap_or((0.0, 1.0));
    Some(PlotBounds::from_min_max([x0, y0], [x1, y1]))
}

fn pad(lo: f64, hi: f64) -> (f64, f64) {
    let margin = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - margin, hi + margin)
}

/// Render one grid cell. Returns what was picked from its context menu.
pub fn show_graph_cell(
    ui: &mut egui::Ui,
    cell: &GraphCell,
    points: &[Vec<[f64; 2]>],
    size: egui::Vec2,
    reset_view: bool,
) -> Option<GraphAction> {
    let mut action = None;
    ui.vertical(|ui| {
        ui.set_width(size.x);
        let mut plot_height = size.y;
        if cell.show_title {
            let title = ui.vertical_centered(|ui| ui.label(egui::RichText::new(&cell.title).strong()));
            plot_height -= title.response.rect.height() + ui.spacing().item_spacing.y;
        }

        let mut plot = Plot::new(("graph_cell", cell.row, cell.col))
            .width(size.x)
            .height(plot_height.max(MIN_CELL_HEIGHT / 2.0))
            .legend(Legend::default().text_style(egui::TextStyle::Body))
            .show_grid(true)
            .x_axis_label(cell.bottom_label.clone());
        if let Some(label) = &cell.left_label {
            plot = plot.y_axis_label(label.clone());
        }
        if cell.x_linked {
            plot = plot.link_axis("time_axis", egui::Vec2b::new(true, false));
        }
        let bounds = if reset_view { forced_bounds(cell) } else { None };

        let response = plot.show(ui, |plot_ui| {
            if let Some(bounds) = bounds {
                plot_ui.set_plot_bounds(bounds);
            }
            for (series, pts) in cell.series.iter().zip(points) {
                let [r, g, b, a] = series.color;
                let line = Line::new(PlotPoints::from(pts.clone()))
                    .name(&series.label)
                    .color(egui::Color32::from_rgba_unmultiplied(r, g, b, a))
                    .width(series.line_width)
                    .style(line_style(series.line));
                plot_ui.line(line);
            }
        });

        let (row, col) = (cell.row, cell.col);
        response.response.context_menu(|ui| {
            ui.menu_button("Hide", |ui| {
                let entries = [
                    ("this plot", VisibilityAction::HidePlot { row, col }),
                    ("this row", VisibilityAction::HideRow(row)),
                    ("this column", VisibilityAction::HideColumn(col)),
                    ("all except this plot", VisibilityAction::HideExceptPlot { row, col }),
                    ("all except this row", VisibilityAction::HideExceptRow(row)),
                    ("all except this column", VisibilityAction::HideExceptColumn(col)),
                ];
                for (label, entry) in entries {
                    if ui.button(label).clicked() {
                        action = Some(GraphAction::Visibility(entry));
                        ui.close_menu();
                    }
                }
            });
            if ui.button("Restore plots").clicked() {
                action = Some(GraphAction::Visibility(VisibilityAction::Restore));
                ui.close_menu();
            }
            ui.separator();
            ui.menu_button("Graph size", |ui| {
                let (mut width, mut height) = (size.x, size.y);
                let mut changed = false;
                egui::Grid::new(("graph_size", row, col)).num_columns(2).show(ui, |ui| {
                    ui.label("width");
                    changed |= ui
                        .add(egui::DragValue::new(&mut width).range(MIN_CELL_WIDTH..=MAX_CELL_SIZE).suffix(" px"))
                        .changed();
                    ui.end_row();
                    ui.label("height");
                    changed |= ui
                        .add(egui::DragValue::new(&mut height).range(MIN_CELL_HEIGHT..=MAX_CELL_SIZE).suffix(" px"))
                        .changed();
                    ui.end_row();
                });
                if changed {
                    action = Some(GraphAction::Resize { row, col, width, height });
                }
            });
        });
    });
    action
}

/// Render every visible cell, row by row.
pub fn show_grid(
    ui: &mut egui::Ui,
    session: &PlotSession,
    points: &SessionPoints,
    reset_view: bool,
) -> Option<GraphAction> {
    let rows = session.visibility.visible_rows();
    if rows.is_empty() {
        let mut action = None;
        ui.add_space(80.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("All plots are hidden.").weak());
            if ui.button("Restore plots").clicked() {
                action = Some(GraphAction::Visibility(VisibilityAction::Restore));
            }
        });
        return action;
    }

    let spacing = ui.spacing().item_spacing;
    let avail = ui.available_size();
    let row_fixed: Vec<Option<f32>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .filter_map(|&(r, c)| session.cell(r, c).and_then(|cell| cell.height_px))
                .reduce(f32::max)
        })
        .collect();
    let row_heights = share(avail.y, &row_fixed, spacing.y, MIN_CELL_HEIGHT);

    let mut action = None;
    egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
        for (row, row_height) in rows.iter().zip(row_heights) {
            let indices: Vec<usize> = row
                .iter()
                .filter_map(|&(r, c)| session.cell_index(r, c))
                .collect();
            let col_fixed: Vec<Option<f32>> = indices.iter().map(|&i| session.cells[i].width_px).collect();
            let widths = share(avail.x, &col_fixed, spacing.x, MIN_CELL_WIDTH);
            ui.horizontal(|ui| {
                for (&i, width) in indices.iter().zip(widths) {
                    let cell = &session.cells[i];
                    let height = cell.height_px.unwrap_or(row_height);
                    let picked = show_graph_cell(ui, cell, &points[i], egui::vec2(width, height), reset_view);
                    if picked.is_some() {
                        action = picked;
                    }
                }
            });
        }
    });
    action
}

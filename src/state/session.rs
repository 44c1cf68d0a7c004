use std::path::PathBuf;
use std::time::Instant;
use crate::config::{self, LayoutConfig, PlotConfig};
use crate::data::{FileLogProvider, LogData, LogDataProvider, ReadWindow};
use crate::diagnostics::{Diagnostic, Stage};
use crate::error::SessionError;
use crate::layout::{resolve_layout, ResolvedGrid};
use crate::state::axes;
use crate::state::graph_state::GraphCell;
use crate::state::labels;
use crate::state::size::{to_pixels, Dpi};
use crate::state::visibility::{GridVisibility, VisibilityAction};

/// Inputs of one plot session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub log_path: PathBuf,
    pub plot_path: PathBuf,
    pub layout_path: PathBuf,
    pub window: ReadWindow,
    pub dpi: Dpi,
}

/// Run `f` and log how long it took.
fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    tracing::info!("{name}: {:.3} ms", start.elapsed().as_secs_f64() * 1000.0);
    out
}

/// Fully resolved grid with its computed series, ready for the renderer.
#[derive(Debug, Clone)]
pub struct PlotSession {
    pub grid: ResolvedGrid,
    /// Same order as `grid.cells`.
    pub cells: Vec<GraphCell>,
    pub visibility: GridVisibility,
    pub link_x: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl PlotSession {
    /// Load both configs and the log, then build.
    pub fn load(cfg: &SessionConfig) -> Result<Self, SessionError> {
        let (plot, layout, data) = timed("getData", || -> Result<_, SessionError> {
            let plot = config::load_plot_config(&cfg.plot_path)?;
            let layout = config::load_layout_config(&cfg.layout_path)?;
            let provider = FileLogProvider::new(&cfg.log_path);
            let data = provider.read(&plot, &layout, cfg.window)?;
            Ok((plot, layout, data))
        })?;
        Ok(Self::build(&plot, &layout, &data, cfg.dpi))
    }

    /// Resolve the layout and compute every cell. Never fails: per-legend and
    /// per-cell problems end up in `diagnostics`.
    pub fn build(plot: &PlotConfig, layout: &LayoutConfig, data: &LogData, dpi: Dpi) -> Self {
        let grid = timed("setLayout", || resolve_layout(layout, plot));
        let mut session = Self {
            cells: grid
                .cells
                .iter()
                .map(|c| GraphCell::new(c.row, c.col, c.title.clone()))
                .collect(),
            visibility: GridVisibility::new(grid.geometry.positions()),
            link_x: false,
            diagnostics: grid.diagnostics.clone(),
            grid,
        };
        timed("plotData", || session.plot_data(data));
        timed("setLabel", || session.set_labels());
        timed("setItemSize", || session.set_item_sizes(dpi));
        timed("linkAxes", || session.link_axes());
        session
    }

    fn plot_data(&mut self, data: &LogData) {
        let times = data.times().unwrap_or_default();
        for (resolved, cell) in self.grid.cells.iter().zip(self.cells.iter_mut()) {
            let first_label = resolved
                .legends
                .first()
                .map(|l| l.label.as_str())
                .unwrap_or_default();
            let plan = match axes::x_plan(&resolved.group, &resolved.title, first_label) {
                Ok(plan) => plan,
                Err(e) => {
                    self.diagnostics
                        .push(Diagnostic::report(Stage::Plot, cell.row, cell.col, e.to_string()));
                    axes::XAxisPlan::default()
                }
            };
            cell.x_axis = plan.axis;

            let shifted: Vec<f64>;
            let cell_times: &[f64] = if plan.offset != 0.0 {
                shifted = times.iter().map(|t| t + plan.offset).collect();
                &shifted
            } else {
                &times
            };

            for legend in &resolved.legends {
                let logs = legend.logs();
                let log_cols = legend.log_cols();
                let before = cell.series.len();
                let result = (legend.func)(
                    &mut *cell,
                    cell_times,
                    data,
                    &logs,
                    &log_cols,
                    legend.sub_column,
                    &legend.label,
                    legend.legend_index,
                );
                match result {
                    Ok(()) => {
                        for series in &mut cell.series[before..] {
                            series.apply_style(&legend.style);
                        }
                    }
                    Err(e) => self.diagnostics.push(Diagnostic::report(
                        Stage::Plot,
                        cell.row,
                        cell.col,
                        format!(
                            "{e} in function: {}, logs: {:?}, log_cols: {:?}",
                            legend.func_name, logs, log_cols
                        ),
                    )),
                }
            }
        }
    }

    fn set_labels(&mut self) {
        for (resolved, cell) in self.grid.cells.iter().zip(self.cells.iter_mut()) {
            let group = &resolved.group;
            cell.show_title = group.title;
            // a hidden title leaves nothing for the unit heuristic to read
            let shown_title = if group.title { cell.title.as_str() } else { "" };
            cell.left_label = labels::left_label(group.left_label.as_deref(), shown_title);
            cell.bottom_label = group.bottom_label.clone();
        }
    }

    fn set_item_sizes(&mut self, dpi: Dpi) {
        for (resolved, cell) in self.grid.cells.iter().zip(self.cells.iter_mut()) {
            let group = &resolved.group;
            cell.width_px = group.width.map(|w| to_pixels(w, dpi.x) as f32);
            cell.height_px = group.height.map(|h| to_pixels(h, dpi.y) as f32);
            cell.downsampling = group.downsampling;
        }
    }

    fn link_axes(&mut self) {
        self.link_x = axes::link_x_axes(self.grid.cells.iter().map(|c| c.group.as_ref()));
        for (resolved, cell) in self.grid.cells.iter().zip(self.cells.iter_mut()) {
            cell.x_linked = self.link_x;
            cell.y_axis = axes::y_axis(&resolved.group);
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GraphCell> {
        self.cell_index(row, col).map(|i| &self.cells[i])
    }

    pub fn cell_index(&self, row: usize, col: usize) -> Option<usize> {
        self.cells.iter().position(|c| c.row == row && c.col == col)
    }

    /// Fix the on-screen size of one cell, overriding the layout's width/height.
    /// Returns false when there is no such cell or the size is not positive.
    pub fn resize(&mut self, row: usize, col: usize, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        let Some(i) = self.cell_index(row, col) else {
            return false;
        };
        tracing::info!("Graph size ({row}, {col}): {width} x {height} px");
        let cell = &mut self.cells[i];
        cell.width_px = Some(width);
        cell.height_px = Some(height);
        true
    }

    pub fn apply(&mut self, action: VisibilityAction) {
        tracing::info!("Visibility: {action:?}");
        self.visibility.apply(action);
    }

    /// One line per cell: position, title and legend labels.
    pub fn summary(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|c| {
                let hidden = if self.visibility.is_visible(c.row, c.col) { "" } else { " (hidden)" };
                format!("({}, {}) {}{}: {}", c.row, c.col, c.title, hidden, c.series_labels().join(", "))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::topic::TopicTable;
    use crate::state::graph_state::AxisState;

    fn plot() -> PlotConfig {
        serde_json::from_str(
            r#"{
                "rh_q":   {"func": "plot_rad2deg", "data": [{"log": "q", "column": [0, 1]}]},
                "v":      {"func": "normal", "data": [{"log": "power", "column": [0]}],
                           "style": {"color": [1, 2, 3]}},
                "broken": {"func": "normal", "data": [{"log": "q", "column": [0, 9]}]},
                "gone":   {"func": "normal", "data": [{"log": "absent", "column": [0]}]}
            }"#,
        )
        .unwrap()
    }

    fn data() -> LogData {
        let mut d = LogData::default();
        d.topics.insert(
            "q".into(),
            Some(TopicTable::from_rows(vec![vec![10.0, 0.0, 1.0], vec![11.0, 0.5, 1.5]]).unwrap()),
        );
        d.topics.insert(
            "power".into(),
            Some(TopicTable::from_rows(vec![vec![10.0, 12.1], vec![11.0, 12.0]]).unwrap()),
        );
        d.topics.insert("absent".into(), None);
        d
    }

    fn layout(json: &str) -> LayoutConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn builds_grid_series_and_labels() {
        let layout = layout(
            r#"{
                "joint_angle": {"title": true, "newline": true, "width": "50mm",
                                "legends": [{"key": "rh_q", "id": [0, 1]}, {"key": "broken", "id": [0, 1]}]},
                "12V_battery": {"title": true, "legends": [{"key": "v", "id": [0]}, {"key": "gone", "id": [0]}],
                                "yRange": {"min": 11.0, "max": 13.0}}
            }"#,
        );
        let s = PlotSession::build(&plot(), &layout, &data(), Dpi::uniform(100.0));
        assert_eq!(s.cells.len(), 3);
        assert!(s.link_x);

        let c00 = s.cell(0, 0).unwrap();
        assert_eq!(c00.series_labels(), ["rh_q_0", "broken_0"]);
        assert_eq!(c00.left_label.as_deref(), Some("[deg]"));
        assert_eq!(c00.bottom_label, "time [s]");
        assert!(c00.show_title);
        assert!((c00.width_px.unwrap() - (100.0 / 25.4 * 50.0) as f32).abs() < 1e-3);

        // broken_1 resolves to column 9, which the topic lacks
        let c01 = s.cell(0, 1).unwrap();
        assert_eq!(c01.series_labels(), ["rh_q_1"]);

        let c10 = s.cell(1, 0).unwrap();
        assert_eq!(c10.title, "12V_battery");
        assert_eq!(c10.series_labels(), ["v_0"]);
        assert_eq!(c10.series[0].color, [1, 2, 3, 255]);
        assert_eq!(c10.left_label.as_deref(), Some("[V]"));
        assert_eq!(c10.y_axis, AxisState { min: Some(11.0), max: Some(13.0) });

        let plot_errors = s.diagnostics.iter().filter(|d| d.stage == Stage::Plot).count();
        assert_eq!(plot_errors, 2);
        assert!(s.diagnostics.iter().any(|d| d.message.contains("function: normal, logs: [\"absent\"]")));
    }

    #[test]
    fn zero_option_offsets_time_and_unlinks() {
        let layout = layout(
            r#"{
                "a": {"legends": [{"key": "rh_q", "id": [0]}], "xRange": {"min": 10.0, "max": 12.0, "zero": true}},
                "b": {"legends": [{"key": "rh_q", "id": [1]}]}
            }"#,
        );
        let s = PlotSession::build(&plot(), &layout, &data(), Dpi::default());
        assert!(!s.link_x);
        let a = s.cell(0, 0).unwrap();
        assert_eq!(a.x_axis, AxisState { min: Some(0.0), max: Some(2.0) });
        assert_eq!(a.series[0].x, vec![0.0, 1.0]);
        let b = s.cell(0, 1).unwrap();
        assert!(b.x_axis.is_auto());
        assert_eq!(b.series[0].x, vec![10.0, 11.0]);
    }

    #[test]
    fn zero_without_min_is_reported_and_cell_still_drawn() {
        let layout = layout(r#"{"a": {"legends": [{"key": "rh_q", "id": [0]}], "xRange": {"zero": true}}}"#);
        let s = PlotSession::build(&plot(), &layout, &data(), Dpi::default());
        assert_eq!(s.diagnostics.len(), 1);
        assert_eq!(s.diagnostics[0].stage, Stage::Plot);
        assert!(s.diagnostics[0].to_string().starts_with("[plotData] row:0, col:0: [a/rh_q_0]"));
        let a = s.cell(0, 0).unwrap();
        assert!(a.x_axis.is_auto());
        assert_eq!(a.series.len(), 1);
    }

    #[test]
    fn hidden_title_gets_no_inferred_unit() {
        let layout = layout(
            r#"{
                "12V_battery": {"title": false, "legends": [{"key": "v", "id": [0]}]},
                "80V_battery": {"title": false, "left_label": "[kV]", "legends": [{"key": "v", "id": [0]}]}
            }"#,
        );
        let s = PlotSession::build(&plot(), &layout, &data(), Dpi::default());
        let hidden = s.cell(0, 0).unwrap();
        assert!(!hidden.show_title);
        assert_eq!(hidden.left_label, None);
        assert_eq!(s.cell(0, 1).unwrap().left_label.as_deref(), Some("[kV]"));
    }

    #[test]
    fn resize_overrides_configured_size() {
        let layout = layout(r#"{"a": {"height": "100px", "legends": [{"key": "rh_q", "id": [0]}]}}"#);
        let mut s = PlotSession::build(&plot(), &layout, &data(), Dpi::default());
        assert_eq!(s.cell(0, 0).unwrap().height_px, Some(100.0));
        assert!(s.resize(0, 0, 320.0, 240.0));
        let c = s.cell(0, 0).unwrap();
        assert_eq!((c.width_px, c.height_px), (Some(320.0), Some(240.0)));
        assert!(!s.resize(3, 0, 320.0, 240.0));
        assert!(!s.resize(0, 0, 0.0, 240.0));
    }

    #[test]
    fn visibility_actions_reach_summary() {
        let layout = layout(r#"{"a": {"legends": [{"key": "rh_q", "id": [0, 1]}]}}"#);
        let mut s = PlotSession::build(&plot(), &layout, &data(), Dpi::default());
        s.apply(VisibilityAction::HidePlot { row: 0, col: 1 });
        let summary = s.summary();
        assert_eq!(summary[0], "(0, 0) a 0: rh_q_0");
        assert_eq!(summary[1], "(0, 1) a 1 (hidden): rh_q_1");
    }

    #[test]
    fn load_reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("run.q"), "0.0 0.1 0.2\n0.01 0.2 0.3\n").unwrap();
        std::fs::write(
            dir.path().join("plot.json"),
            r#"{"rh_q": {"func": "plot_rad2deg", "data": [{"log": "q", "column": [0, 1]}]}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("layout.json"),
            r#"{"joint_angle": {"legends": [{"key": "rh_q", "id": [0, 1]}]}}"#,
        )
        .unwrap();
        let cfg = SessionConfig {
            log_path: dir.path().join("run"),
            plot_path: dir.path().join("plot.json"),
            layout_path: dir.path().join("layout.json"),
            window: ReadWindow::default(),
            dpi: Dpi::default(),
        };
        let s = PlotSession::load(&cfg).unwrap();
        assert_eq!(s.cells.len(), 2);
        assert!(s.diagnostics.is_empty());
        assert_eq!(s.cells[1].series[0].x.len(), 2);
    }
}

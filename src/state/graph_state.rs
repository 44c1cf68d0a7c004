use crate::config::Downsampling;
use crate::state::data_series::DataSeries;

/// Resolved bounds for one axis. `None` on either side means autorange.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisState {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AxisState {
    pub fn is_auto(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Everything the renderer needs to draw one grid cell.
#[derive(Debug, Clone)]
pub struct GraphCell {
    pub row: usize,
    pub col: usize,
    pub title: String,
    pub show_title: bool,
    pub series: Vec<DataSeries>,
    pub x_axis: AxisState,
    pub y_axis: AxisState,
    /// Linked to the shared time axis of all other cells.
    pub x_linked: bool,
    pub left_label: Option<String>,
    pub bottom_label: String,
    /// Fixed size in pixels, when configured.
    pub width_px: Option<f32>,
    pub height_px: Option<f32>,
    pub downsampling: Option<Downsampling>,
}

impl GraphCell {
    pub fn new(row: usize, col: usize, title: String) -> Self {
        Self {
            row,
            col,
            title,
            show_title: false,
            series: Vec::new(),
            x_axis: AxisState::default(),
            y_axis: AxisState::default(),
            x_linked: false,
            left_label: None,
            bottom_label: String::new(),
            width_px: None,
            height_px: None,
            downsampling: None,
        }
    }

    /// Add one trace; its label becomes a legend entry.
    pub fn add_series(&mut self, series: DataSeries) {
        self.series.push(series);
    }

    pub fn series_labels(&self) -> Vec<String> {
        self.series.iter().map(|s| s.label.clone()).collect()
    }

    /// Global x range across all series.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        merge_bounds(self.series.iter().filter_map(|s| s.x_bounds()))
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        merge_bounds(self.series.iter().filter_map(|s| s.y_bounds()))
    }
}

fn merge_bounds(bounds: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    bounds.fold(None, |acc, (lo, hi)| match acc {
        None => Some((lo, hi)),
        Some((a, b)) => Some((a.min(lo), b.max(hi))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_span_all_series() {
        let mut cell = GraphCell::new(0, 0, "g".into());
        assert_eq!(cell.x_range(), None);
        cell.add_series(DataSeries::for_legend("a", vec![0.0, 1.0], vec![5.0, 6.0], 0));
        cell.add_series(DataSeries::for_legend("b", vec![-1.0, 0.5], vec![2.0, 3.0], 1));
        assert_eq!(cell.x_range(), Some((-1.0, 1.0)));
        assert_eq!(cell.y_range(), Some((2.0, 6.0)));
        assert_eq!(cell.series_labels(), ["a", "b"]);
    }
}

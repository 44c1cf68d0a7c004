use crate::config::{LineKind, StyleHints};

/// Legend color cycle, indexed by legend position within a cell.
pub const COLOR_PALETTE: [[u8; 4]; 7] = [
    [255, 0, 0, 255],   // Red
    [0, 160, 0, 255],   // Green
    [0, 0, 255, 255],   // Blue
    [0, 190, 190, 255], // Cyan
    [200, 0, 200, 255], // Magenta
    [200, 160, 0, 255], // Yellow (darkened for white background)
    [0, 0, 0, 255],     // Black
];

/// Dash cycle; advances once the color cycle wraps.
pub const LINE_CYCLE: [LineKind; 4] = [LineKind::Solid, LineKind::Dash, LineKind::Dot, LineKind::DashDot];

pub fn color_for_index(index: usize) -> [u8; 4] {
    COLOR_PALETTE[index % COLOR_PALETTE.len()]
}

pub fn line_for_index(index: usize) -> LineKind {
    LINE_CYCLE[(index / COLOR_PALETTE.len()) % LINE_CYCLE.len()]
}

/// One plotted trace inside a graph cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSeries {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: [u8; 4],
    pub line: LineKind,
    /// Line width (pixels).
    pub line_width: f32,
}

impl DataSeries {
    /// Series styled from the legend-index cycle.
    pub fn for_legend(label: &str, x: Vec<f64>, y: Vec<f64>, legend_index: usize) -> Self {
        Self {
            label: label.to_string(),
            x,
            y,
            color: color_for_index(legend_index),
            line: line_for_index(legend_index),
            line_width: 2.0,
        }
    }

    /// Override the cycle with explicit hints from the plot config.
    pub fn apply_style(&mut self, style: &StyleHints) {
        if let Some([r, g, b]) = style.color {
            self.color = [r, g, b, 255];
        }
        if let Some(w) = style.width {
            self.line_width = w;
        }
        if let Some(line) = style.line {
            self.line = line;
        }
    }

    /// Finite (min, max) of the x values.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        finite_bounds(&self.x)
    }

    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        finite_bounds(&self.y)
    }
}

pub fn finite_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

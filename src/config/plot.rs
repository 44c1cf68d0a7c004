use indexmap::IndexMap;
use serde::Deserialize;
use crate::config::index_spec::deserialize_indices;

/// Reference into one topic: the topic name and the list of usable value columns.
/// A legend's `id` selects one entry of `column`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DataSource {
    pub log: String,
    #[serde(deserialize_with = "deserialize_indices")]
    pub column: Vec<usize>,
}

/// Line dash pattern hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Solid,
    Dash,
    Dot,
    DashDot,
}

/// Optional per-signal style hints. Unset fields fall back to the legend-index cycle.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StyleHints {
    /// RGB color as `[r, g, b]`.
    pub color: Option<[u8; 3]>,
    pub width: Option<f32>,
    pub line: Option<LineKind>,
}

/// How to derive one displayable signal.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlotSpec {
    pub func: String,
    pub data: Vec<DataSource>,
    /// Legend label prefix; defaults to the entry's key.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub style: StyleHints,
}

/// Whole plot configuration, keyed by signal name.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PlotConfig {
    pub entries: IndexMap<String, PlotSpec>,
}

impl PlotConfig {
    pub fn get(&self, key: &str) -> Option<&PlotSpec> {
        self.entries.get(key)
    }
}

use std::path::{Path, PathBuf};
use indexmap::IndexMap;
use crate::config::{LayoutConfig, PlotConfig};
use crate::data::topic::TopicTable;
use crate::error::LogError;

/// Row window applied while reading. `length == 0` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadWindow {
    pub start: usize,
    pub length: usize,
}

/// Everything the provider yields: one entry per topic, `None` when unavailable.
#[derive(Debug, Clone, Default)]
pub struct LogData {
    pub topics: IndexMap<String, Option<TopicTable>>,
}

impl LogData {
    /// Shared time axis: the time column of the first available topic.
    pub fn times(&self) -> Option<Vec<f64>> {
        self.topics.values().flatten().next().map(|t| t.times())
    }

    pub fn topic(&self, name: &str) -> Option<&TopicTable> {
        self.topics.get(name).and_then(|t| t.as_ref())
    }
}

/// Source of topic tables for a plot session.
pub trait LogDataProvider {
    fn read(
        &self,
        plot: &PlotConfig,
        layout: &LayoutConfig,
        window: ReadWindow,
    ) -> Result<LogData, LogError>;
}

/// Topics needed to draw `layout`, in order of first use.
pub fn required_topics(plot: &PlotConfig, layout: &LayoutConfig) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for group in &layout.groups {
        for legend in &group.legends {
            let Some(spec) = plot.get(&legend.key) else { continue };
            for src in &spec.data {
                if !out.contains(&src.log) {
                    out.push(src.log.clone());
                }
            }
        }
    }
    out
}

/// hrpsys-style logs: one whitespace separated text file per topic,
/// named `<log path>.<topic>`.
pub struct FileLogProvider {
    base: PathBuf,
}

impl FileLogProvider {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn topic_path(&self, topic: &str) -> PathBuf {
        let mut name = self.base.as_os_str().to_os_string();
        name.push(".");
        name.push(topic);
        PathBuf::from(name)
    }
}

impl LogDataProvider for FileLogProvider {
    fn read(
        &self,
        plot: &PlotConfig,
        layout: &LayoutConfig,
        window: ReadWindow,
    ) -> Result<LogData, LogError> {
        let mut data = LogData::default();
        for topic in required_topics(plot, layout) {
            let path = self.topic_path(&topic);
            let table = if path.exists() {
                match read_topic_file(&path, window) {
                    Ok(table) => {
                        tracing::info!("Read {} rows from {:?}", table.row_count(), path);
                        Some(table)
                    }
                    Err(e) => {
                        tracing::warn!("Skipping topic {topic}: {e}");
                        None
                    }
                }
            } else {
                tracing::warn!("Topic {topic} not found at {:?}", path);
                None
            };
            data.topics.insert(topic, table);
        }
        if data.topics.values().all(|t| t.is_none()) {
            return Err(LogError::NoData(self.base.clone()));
        }
        Ok(data)
    }
}

/// Parse one topic file, honouring the row window.
pub fn read_topic_file(path: &Path, window: ReadWindow) -> Result<TopicTable, LogError> {
    let content = std::fs::read(path).map_err(|source| LogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_slice());

    let parse_err = |line: usize, message: String| LogError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (i, result) in reader.records().enumerate() {
        if i < window.start {
            continue;
        }
        if window.length != 0 && rows.len() >= window.length {
            break;
        }
        let record = result.map_err(|e| parse_err(i + 1, e.to_string()))?;
        let mut row = Vec::with_capacity(record.len());
        for field in record.iter().flat_map(|f| f.split('\t')) {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            let v = field
                .parse::<f64>()
                .map_err(|_| parse_err(i + 1, format!("not a number: {field:?}")))?;
            row.push(v);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    TopicTable::from_rows(rows).map_err(|message| parse_err(0, message))
}

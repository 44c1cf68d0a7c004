use std::path::PathBuf;

/// Errors raised while loading or validating the plot/layout configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid index range {0:?} (expected N or \"A-B\" with A <= B)")]
    IndexRange(String),
    #[error("invalid size {0:?} (expected a number with optional mm/pt/px suffix)")]
    Size(String),
    #[error("[{graph}/{label}] please set xRange/min to use xRange/zero option")]
    ZeroWithoutMin { graph: String, label: String },
}

/// Failure to bind one (group, sub-column, legend) slot.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("layout has no legend {legend} in group {group}")]
    SlotOutOfRange { group: usize, legend: usize },
    #[error("plot config has no entry {0:?}")]
    MissingPlot(String),
    #[error("legend {key:?} has {len} ids, sub-column {sub_column} requested")]
    SubColumnOutOfRange {
        key: String,
        sub_column: usize,
        len: usize,
    },
    #[error("legend {key:?} id {id} exceeds {len} columns of log {log:?}")]
    ColumnOutOfRange {
        key: String,
        log: String,
        id: usize,
        len: usize,
    },
    #[error("unknown plot function {0:?}")]
    UnknownFunction(String),
}

/// Failure inside a signal function. Only the offending legend is dropped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("no data for log {0:?}")]
    MissingTopic(String),
    #[error("column {column} out of range for log {log:?} ({width} columns)")]
    ColumnOutOfRange {
        log: String,
        column: usize,
        width: usize,
    },
    #[error("expected {expected} data references, got {got}")]
    ArgumentShape { expected: usize, got: usize },
    #[error("series length {values} does not match {times} time samples")]
    LengthMismatch { values: usize, times: usize },
}

/// Errors from the log data provider.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("no topic of {0} could be read")]
    NoData(PathBuf),
}

/// Anything that stops a plot session from being built at all.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Log(#[from] LogError),
}

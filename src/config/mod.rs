pub mod index_spec;
pub mod layout;
pub mod plot;

use std::path::Path;
use serde::de::DeserializeOwned;
use crate::error::ConfigError;

pub use layout::{AxisRange, DownsampleMode, Downsampling, LayoutConfig, LayoutGroup, Size, SizeUnit};
pub use plot::{LineKind, PlotConfig, StyleHints};

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the signal definitions file.
pub fn load_plot_config(path: &Path) -> Result<PlotConfig, ConfigError> {
    let cfg: PlotConfig = load_json(path)?;
    tracing::info!("Loaded {} plot entries from {:?}", cfg.entries.len(), path);
    Ok(cfg)
}

/// Load the grid layout file.
pub fn load_layout_config(path: &Path) -> Result<LayoutConfig, ConfigError> {
    let cfg: LayoutConfig = load_json(path)?;
    tracing::info!("Loaded {} layout groups from {:?}", cfg.groups.len(), path);
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reports_path_on_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_layout_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_plot_config(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_plot_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"a": {{"func": "normal", "data": [{{"log": "t", "column": [0]}}]}}}}"#).unwrap();
        let cfg = load_plot_config(file.path()).unwrap();
        assert_eq!(cfg.entries.len(), 1);
    }
}

//! Dashboard Configuration
//! Source locations and fill policies, optionally overridden by `dashboard.json`.

use crate::data::{FillAxis, FillScope};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the pipeline and the window need to start.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub life_expectancy_file: String,
    pub population_file: String,
    pub gni_per_capita_file: String,
    /// Fill direction applied to the raw wide tables right after load
    pub load_fill: FillAxis,
    /// Fill grouping applied to the merged table
    pub merge_fill: FillScope,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            life_expectancy_file: "lex.csv".to_string(),
            population_file: "pop.csv".to_string(),
            gni_per_capita_file: "ny_gnp_pcap_pp_cd.csv".to_string(),
            load_fill: FillAxis::default(),
            merge_fill: FillScope::default(),
            window_size: [1400.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    pub fn life_expectancy_path(&self) -> PathBuf {
        self.data_dir.join(&self.life_expectancy_file)
    }

    pub fn population_path(&self) -> PathBuf {
        self.data_dir.join(&self.population_file)
    }

    pub fn gni_per_capita_path(&self) -> PathBuf {
        self.data_dir.join(&self.gni_per_capita_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.population_path(), PathBuf::from("data").join("pop.csv"));
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "data_dir": "/srv/indicators", "merge_fill": "country" }"#).unwrap();

        let config = DashboardConfig::load_or_default(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/indicators"));
        assert_eq!(config.merge_fill, FillScope::Country);
        assert_eq!(config.load_fill, FillAxis::Row);
        assert_eq!(config.life_expectancy_file, "lex.csv");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = DashboardConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

//! Console configuration file.
//!
//! ```toml
//! log_level = "info"
//!
//! [reports.pipeline-health]
//! precision = 2
//! undefined_rate = "zero"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vantage_model::{ModelError, ReportOverrides};
use vantage_reports::{Report, ReportError, ReportId};

/// Log filter used when neither `--log-level`, the file nor `RUST_LOG` set one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("overrides name unknown report '{0}'")]
    UnknownReport(String),

    #[error("overrides for '{report}' are invalid: {source}")]
    InvalidOverride {
        report: ReportId,
        #[source]
        source: ModelError,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub log_level: Option<String>,
    /// Overrides keyed by report id.
    #[serde(default)]
    pub reports: BTreeMap<String, ReportOverrides>,
}

impl ConsoleConfig {
    /// `<config dir>/vantage/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vantage").join("config.toml"))
    }

    /// File that [`ConsoleConfig::load`] reads: the explicit path, else the
    /// default path when that file exists. `None` means built-in defaults.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        }
    }

    /// Load an explicit file, or the default file if it exists, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config: Self = toml::from_str(&raw)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.check_report_ids()?;
        Ok(config)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn overrides_for(&self, id: ReportId) -> Option<&ReportOverrides> {
        self.reports.get(id.as_str())
    }

    /// Built-in report with this file's overrides layered on.
    pub fn report(&self, id: ReportId) -> Result<Report, ConfigError> {
        let mut report = Report::builtin(id)?;
        if let Some(overrides) = self.overrides_for(id) {
            report
                .config
                .apply_overrides(overrides)
                .map_err(|source| ConfigError::InvalidOverride { report: id, source })?;
            tracing::debug!(report = %id, "applied report overrides");
        }
        Ok(report)
    }

    fn check_report_ids(&self) -> Result<(), ConfigError> {
        for key in self.reports.keys() {
            key.parse::<ReportId>()
                .map_err(|_| ConfigError::UnknownReport(key.clone()))?;
        }
        Ok(())
    }
}

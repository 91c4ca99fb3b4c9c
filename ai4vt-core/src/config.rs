//! Dashboard configuration — optional TOML file, every key defaulted.
//!
//! ```toml
//! api_url = "https://ai4vt-production.up.railway.app"
//! timeout_secs = 30
//! page_size = 10
//! default_range = "90d"
//! refresh_secs = 300
//! log_dir = "/tmp/ai4vt-logs"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{ApiClient, ApiError, DEFAULT_API_URL};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::series::TimeRange;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Base URL serving `/results` and `/summary/{date}`.
    pub api_url: String,
    pub timeout_secs: u64,
    /// History table rows per page.
    pub page_size: usize,
    /// Initial trend-chart window.
    pub default_range: TimeRange,
    /// Refetch period for the TUI; `None` fetches once at startup.
    pub refresh_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
            default_range: TimeRange::default(),
            refresh_secs: None,
            log_dir: None,
        }
    }
}

impl DashboardConfig {
    /// `<config_dir>/ai4vt/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ai4vt").join("config.toml"))
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Load from `path` if given, else from [`default_path`](Self::default_path).
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => match Self::default_path() {
                Some(p) => Self::load(&p),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.refresh_secs == Some(0) {
            return Err(ConfigError::Invalid("refresh_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_secs.map(Duration::from_secs)
    }

    /// Configured log directory, else `<data_local_dir>/ai4vt/logs`, else `./logs`.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join("ai4vt").join("logs")))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    pub fn client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(&self.api_url, self.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        let c = DashboardConfig::from_toml("").unwrap();
        assert_eq!(c, DashboardConfig::default());
        assert_eq!(c.page_size, 10);
        assert_eq!(c.default_range, TimeRange::Last90Days);
        assert_eq!(c.refresh_interval(), None);
    }

    #[test]
    fn partial_override() {
        let c = DashboardConfig::from_toml(
            r#"
            api_url = "http://localhost:8000"
            default_range = "30d"
            refresh_secs = 120
            "#,
        )
        .unwrap();
        assert_eq!(c.api_url, "http://localhost:8000");
        assert_eq!(c.default_range, TimeRange::Last30Days);
        assert_eq!(c.refresh_interval(), Some(Duration::from_secs(120)));
        assert_eq!(c.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(
            DashboardConfig::from_toml("colour = \"red\""),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn zero_values_rejected() {
        assert!(matches!(
            DashboardConfig::from_toml("page_size = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml("timeout_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml("refresh_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_file_is_defaults() {
        let c = DashboardConfig::load(Path::new("/nonexistent/ai4vt/config.toml")).unwrap();
        assert_eq!(c, DashboardConfig::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = [").unwrap();
        let err = DashboardConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = DashboardConfig::default();
        config.page_size = 25;
        config.log_dir = Some(dir.path().join("logs"));
        std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        let loaded = DashboardConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.log_dir(), dir.path().join("logs"));
    }

    #[test]
    fn builds_client() {
        let c = DashboardConfig::default();
        assert_eq!(c.client().unwrap().base_url(), DEFAULT_API_URL);
    }
}

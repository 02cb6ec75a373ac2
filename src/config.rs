//! Runtime settings.
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file,
//! `STATUSWATCH_*` environment variables, then command-line flags.
//!
//! ```toml
//! endpoint = "https://status.example.com"
//! token = "..."
//! page = "status"
//! refresh_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

use crate::app::Page;
use crate::poller::DEFAULT_INTERVAL;
use crate::source::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// Prefix for environment overrides, e.g. `STATUSWATCH_ENDPOINT`.
pub const ENV_PREFIX: &str = "STATUSWATCH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend base URL.
    pub endpoint: String,
    /// Bearer token for the backend.
    pub token: Option<String>,
    /// Read from this file instead of the backend.
    pub file: Option<PathBuf>,
    /// Page shown at startup.
    pub page: Page,
    pub refresh_secs: u64,
    pub timeout_secs: u64,
    /// Write logs here; no logging otherwise.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            file: None,
            page: Page::default(),
            refresh_secs: DEFAULT_INTERVAL.as_secs(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            log_file: None,
        }
    }
}

/// Values given on the command line. `None` leaves the layered value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub file: Option<PathBuf>,
    pub page: Option<Page>,
    pub refresh_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load defaults, then `path` (if any), then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::build(path, None)
    }

    pub(crate) fn build(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Apply command-line flags on top.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if overrides.token.is_some() {
            self.token = overrides.token;
        }
        if overrides.file.is_some() {
            self.file = overrides.file;
        }
        if let Some(page) = overrides.page {
            self.page = page;
        }
        if let Some(refresh) = overrides.refresh_secs {
            self.refresh_secs = refresh;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        if overrides.log_file.is_some() {
            self.log_file = overrides.log_file;
        }
        self
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::build(None, Some(Map::new())).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.endpoint, "http://localhost:3000");
        assert_eq!(settings.refresh_interval(), Duration::from_secs(60));
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.page, Page::Dashboard);
    }

    #[test]
    fn test_file_layer() {
        let file = toml_file(
            r#"
            endpoint = "https://status.example.com"
            page = "status"
            refresh_secs = 30
            "#,
        );

        let settings = Settings::build(Some(file.path()), Some(Map::new())).unwrap();
        assert_eq!(settings.endpoint, "https://status.example.com");
        assert_eq!(settings.page, Page::StatusPage);
        assert_eq!(settings.refresh_secs, 30);
        assert_eq!(settings.timeout_secs, 10);
    }

    #[test]
    fn test_env_beats_file() {
        let file = toml_file(r#"endpoint = "https://from-file""#);
        let mut env = Map::new();
        env.insert("STATUSWATCH_ENDPOINT".to_string(), "https://from-env".to_string());
        env.insert("STATUSWATCH_REFRESH_SECS".to_string(), "15".to_string());

        let settings = Settings::build(Some(file.path()), Some(env)).unwrap();
        assert_eq!(settings.endpoint, "https://from-env");
        assert_eq!(settings.refresh_secs, 15);
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default().with_overrides(Overrides {
            endpoint: Some("http://cli".to_string()),
            page: Some(Page::StatusPage),
            refresh_secs: Some(5),
            ..Overrides::default()
        });

        assert_eq!(settings.endpoint, "http://cli");
        assert_eq!(settings.page, Page::StatusPage);
        assert_eq!(settings.refresh_interval(), Duration::from_secs(5));
        assert!(settings.token.is_none());
    }

    #[test]
    fn test_zero_refresh_is_clamped() {
        let settings = Settings {
            refresh_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Settings::build(Some(Path::new("/nonexistent/statuswatch.toml")), None).is_err());
    }
}

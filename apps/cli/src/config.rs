use std::{path::PathBuf, time::Duration};

use wealthtrack_client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use wealthtrack_core::errors::{Error, Result};

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout: Duration,
    pub session_file: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `WT_*` variables, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("WT_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(Error::Config(format!("Invalid WT_API_URL '{}'", api_url)));
        }

        let default_timeout_ms = DEFAULT_TIMEOUT_SECS * 1000;
        let timeout_ms: u64 = lookup("WT_REQUEST_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(default_timeout_ms);

        let session_file = lookup("WT_SESSION_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_session_file);

        let log_format = match lookup("WT_LOG_FORMAT") {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            api_url,
            request_timeout: Duration::from_millis(timeout_ms),
            session_file,
            log_format,
        })
    }

    /// Applies command-line flags, which win over the environment.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        session_file: Option<PathBuf>,
    ) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(session_file) = session_file {
            self.session_file = session_file;
        }
        self
    }
}

fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("wealthtrack").join(SESSION_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(".wealthtrack").join(SESSION_FILE_NAME))
}

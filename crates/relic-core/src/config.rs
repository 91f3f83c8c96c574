//! Runtime configuration.
//!
//! Values are resolved with the following precedence (highest first):
//! environment variables (including a `.env` file), `relic.toml` in the
//! working directory, built-in defaults. CLI flags are applied on top by
//! the binary.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RelicError, RelicResult};

/// Default port of the local web server.
pub const DEFAULT_PORT: u16 = 8503;

/// Default host the web server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default Generative Language API base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "relic.toml";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_UPLOAD_MB: usize = 20;

/// Application-wide configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Gemini API key. `None` disables the cloud path.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Explicit model override; bypasses the preference order.
    pub model: Option<String>,

    pub api_base: String,
    pub host: String,
    pub port: u16,
    pub cloud_timeout: Duration,

    /// Upload cap for the web form, in bytes.
    pub max_upload_bytes: usize,
}

/// Shape of `relic.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub google_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_api_base: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cloud_timeout_secs: Option<u64>,
    pub max_upload_mb: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            api_base: DEFAULT_API_BASE.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cloud_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration for the given working directory.
    ///
    /// Reads `<dir>/.env` (silently ignored when missing) and `<dir>/relic.toml`.
    pub fn load(dir: &Path) -> RelicResult<Self> {
        let _ = dotenvy::from_path(dir.join(".env"));

        let file = FileConfig::read(&dir.join(CONFIG_FILE_NAME))?;
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a file config with an environment lookup over the defaults.
    pub fn resolve<F>(file: Option<FileConfig>, env: F) -> RelicResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let lookup = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_key = lookup("GOOGLE_API_KEY").or_else(|| non_blank(file.google_api_key));
        let model = lookup("GEMINI_MODEL").or_else(|| non_blank(file.gemini_model));
        let api_base = lookup("GEMINI_API_BASE")
            .or(file.gemini_api_base)
            .unwrap_or(defaults.api_base)
            .trim_end_matches('/')
            .to_string();
        let host = lookup("RELIC_HOST").or(file.host).unwrap_or(defaults.host);

        let port = match lookup("RELIC_PORT") {
            Some(raw) => parse_var("RELIC_PORT", &raw)?,
            None => file.port.unwrap_or(defaults.port),
        };
        let timeout_secs: u64 = match lookup("RELIC_CLOUD_TIMEOUT_SECS") {
            Some(raw) => parse_var("RELIC_CLOUD_TIMEOUT_SECS", &raw)?,
            None => file.cloud_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        let max_upload_mb: usize = match lookup("RELIC_MAX_UPLOAD_MB") {
            Some(raw) => parse_var("RELIC_MAX_UPLOAD_MB", &raw)?,
            None => file.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB),
        };

        if timeout_secs == 0 {
            return Err(RelicError::config("cloud timeout must be at least 1 second"));
        }
        let max_upload_bytes = max_upload_mb
            .max(1)
            .checked_mul(1024 * 1024)
            .ok_or_else(|| RelicError::config(format!("max upload size of {} MB is too large", max_upload_mb)))?;

        Ok(Self {
            api_key,
            model,
            api_base,
            host,
            port,
            cloud_timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes,
        })
    }

    /// Whether a credential for the cloud path is present.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Address string for the web server listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FileConfig {
    /// Read a config file. A missing file yields `Ok(None)`.
    pub fn read(path: &Path) -> RelicResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        debug!(path = %path.display(), "Reading config file");
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
            .map(Some)
            .map_err(|e| RelicError::config(format!("{}: {}", path.display(), e)))
    }

    /// Parse config file contents.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> RelicResult<T> {
    raw.parse()
        .map_err(|_| RelicError::config(format!("invalid value for {}: '{}'", key, raw)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

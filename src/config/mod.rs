//! Configuration for the document browser
//!
//! Configuration is resolved in order of precedence:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables
//! 3. Config file (~/.config/docscout/config.toml, or `--config <path>`)
//! 4. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Welcome document shown when no `content_path` is configured
pub const DEFAULT_CONTENT: &str = include_str!("../../assets/welcome.md");

const DEFAULT_DATA_DIR: &str = "./data/";
const DEFAULT_EMBED_URL: &str = "http://localhost:8000/embed";
const DEFAULT_PLACEHOLDER: &str = "Ask a question about an RFC...";
const DEFAULT_EXTENSIONS: [&str; 5] = [".mod", ".sum", ".go", ".txt", ".md"];

/// The error banner never clears sooner than this
pub const MIN_ERROR_TIMEOUT_MS: u64 = 2000;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the document collection (file selector and embedding batch)
    pub data_dir: PathBuf,

    /// File extensions the selector accepts (exact, case-sensitive suffixes)
    pub allowed_extensions: Vec<String>,

    /// Embedding endpoint (POST `{"text": ...}`)
    pub embed_url: String,

    /// Per-request timeout for the embedding endpoint
    pub request_timeout_secs: u64,

    /// How long the error banner stays up
    pub error_timeout_ms: u64,

    /// Placeholder shown in the empty query input
    pub placeholder: String,

    /// Preferred width of the query input (rendering hint only)
    pub input_width: u16,

    /// Markdown document for the content viewport; built-in welcome text if unset
    pub content_path: Option<PathBuf>,

    /// Run the embedding batch over `data_dir` at startup
    pub embed_on_startup: bool,

    /// Theme name: "pink", "auto", "nord"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            embed_url: DEFAULT_EMBED_URL.to_string(),
            request_timeout_secs: 30,
            error_timeout_ms: MIN_ERROR_TIMEOUT_MS,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            input_width: 100,
            content_path: None,
            embed_on_startup: true,
            theme: "pink".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub data_dir: Option<String>,
    pub allowed_extensions: Option<Vec<String>>,
    pub embed_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub error_timeout_ms: Option<u64>,
    pub placeholder: Option<String>,
    pub input_width: Option<u16>,
    pub content_path: Option<String>,
    pub embed_on_startup: Option<bool>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub embed_url: Option<String>,
    pub content_path: Option<PathBuf>,
    pub no_embed: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/docscout/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("docscout").join("config.toml"))
    }

    /// Load configuration: flags -> env vars -> file -> defaults
    ///
    /// A config file that exists but cannot be read or parsed is an error.
    /// A missing default config file is not; a missing `--config` file is.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let file = match &overrides.config_path {
            Some(path) => Self::load_file_config(path)?.with_context(|| {
                format!("Config file {} does not exist", path.display())
            })?,
            None => match Self::config_path() {
                Some(path) => Self::load_file_config(&path)?.unwrap_or_default(),
                None => FileConfig::default(),
            },
        };

        let mut config = Self::resolve(file, |key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        Ok(config)
    }

    /// Read and parse a config file; `Ok(None)` if it does not exist
    fn load_file_config(path: &Path) -> Result<Option<FileConfig>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let parsed = toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?;
                Ok(Some(parsed))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read config file {}", path.display())),
        }
    }

    /// Merge file values and environment over the defaults
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Data directory: env > file > default
        let data_dir = env("DOCSCOUT_DATA_DIR")
            .or(file.data_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        // Embedding endpoint: env > file > default
        let embed_url = env("DOCSCOUT_EMBED_URL")
            .or(file.embed_url)
            .unwrap_or(defaults.embed_url);

        // Theme: env > file > default
        let theme = env("DOCSCOUT_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // Welcome document: env > file > built-in
        let content_path = env("DOCSCOUT_CONTENT")
            .or(file.content_path)
            .map(PathBuf::from);

        Self {
            data_dir,
            allowed_extensions: file
                .allowed_extensions
                .unwrap_or(defaults.allowed_extensions),
            embed_url,
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            error_timeout_ms: file
                .error_timeout_ms
                .unwrap_or(defaults.error_timeout_ms)
                .max(MIN_ERROR_TIMEOUT_MS),
            placeholder: file.placeholder.unwrap_or(defaults.placeholder),
            input_width: file.input_width.unwrap_or(defaults.input_width),
            content_path,
            embed_on_startup: file.embed_on_startup.unwrap_or(defaults.embed_on_startup),
            theme,
            logging: LoggingConfig::from_file(file.logging),
        }
    }

    /// Apply command-line flags on top of everything else
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(url) = &overrides.embed_url {
            self.embed_url = url.clone();
        }
        if let Some(path) = &overrides.content_path {
            self.content_path = Some(path.clone());
        }
        if overrides.no_embed {
            self.embed_on_startup = false;
        }
    }

    pub fn error_timeout(&self) -> Duration {
        Duration::from_millis(self.error_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load the markdown shown in the content viewport
    pub fn load_content(&self) -> Result<String> {
        match &self.content_path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read content file {}", path.display())),
            None => Ok(DEFAULT_CONTENT.to_string()),
        }
    }
}

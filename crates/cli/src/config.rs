//! Layered configuration: defaults, TOML file, environment, then flags.
//!
//! The file is `--config <path>` when given, else `./yapi2ts.toml`, else
//! `~/.yapi2ts/config.toml`. A missing default file is not an error.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;
use yapi2ts_core::{CollisionStrategy, DEFAULT_CONCURRENCY};

/// Project-local config filename
pub const CONFIG_FILENAME: &str = "yapi2ts.toml";
/// Directory name in home
const HOME_DIR: &str = ".yapi2ts";
/// Config filename inside the home directory
const HOME_CONFIG_FILENAME: &str = "config.toml";

/// Environment variable holding the project token
pub const TOKEN_ENV: &str = "YAPI2TS_TOKEN";
/// Environment variable holding the server URL
pub const BASE_URL_ENV: &str = "YAPI2TS_BASE_URL";

/// Output directory when nothing else is configured
const DEFAULT_OUT_DIR: &str = "yapi";

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// TOML decoding error
        #[source]
        source: Box<toml::de::Error>,
    },

    /// No token in any layer
    #[error("YAPI token is not set (use --token, YAPI2TS_TOKEN or `token` in yapi2ts.toml)")]
    MissingToken,

    /// No base URL in any layer
    #[error("YAPI base URL is not set (use --base-url, YAPI2TS_BASE_URL or `base_url` in yapi2ts.toml)")]
    MissingBaseUrl,

    /// The base URL does not parse
    #[error("Invalid YAPI base URL '{value}': {source}")]
    InvalidBaseUrl {
        /// The configured text
        value: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },

    /// `out_dir` was set to an empty path
    #[error("Output directory must not be empty")]
    EmptyOutDir,
}

/// Collision handling as spelled in flags and config files.
#[derive(ValueEnum, Deserialize, Clone, Debug, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionSetting {
    /// Later modules replace earlier files of the same name
    Overwrite,
    /// Later modules are written to `<name>_<id>.ts`
    QualifyById,
    /// Later modules are skipped and reported as failures
    Reject,
}

impl From<CollisionSetting> for CollisionStrategy {
    fn from(setting: CollisionSetting) -> Self {
        match setting {
            CollisionSetting::Overwrite => CollisionStrategy::Overwrite,
            CollisionSetting::QualifyById => CollisionStrategy::QualifyById,
            CollisionSetting::Reject => CollisionStrategy::Reject,
        }
    }
}

/// Contents of a config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// YAPI server URL
    pub base_url: Option<String>,
    /// Project token
    pub token: Option<String>,
    /// Output directory
    pub out_dir: Option<PathBuf>,
    /// Maximum in-flight detail fetches
    pub concurrency: Option<usize>,
    /// Collision handling
    pub collision: Option<CollisionSetting>,
}

impl FileConfig {
    /// Read and parse a TOML config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--config`
    pub config_path: Option<PathBuf>,
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--token`
    pub token: Option<String>,
    /// `--out`
    pub out_dir: Option<PathBuf>,
    /// `--concurrency`
    pub concurrency: Option<usize>,
    /// `--collision`
    pub collision: Option<CollisionSetting>,
}

/// Fully resolved and validated configuration.
#[derive(Clone)]
pub struct Config {
    /// YAPI server URL
    pub base_url: Url,
    /// Project token, never logged
    pub token: String,
    /// Directory the modules are written to
    pub out_dir: PathBuf,
    /// Maximum in-flight detail fetches, `0` for no limit
    pub concurrency: usize,
    /// Collision handling for the batch
    pub collision: CollisionStrategy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("out_dir", &self.out_dir)
            .field("concurrency", &self.concurrency)
            .field("collision", &self.collision)
            .finish()
    }
}

impl Config {
    /// Load from the discovered config file and the process environment.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let path = locate_config_file(
            overrides.config_path.as_deref(),
            &cwd,
            dirs::home_dir().as_deref(),
        );

        let file = match &path {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file.");
                FileConfig::read(path)?
            }
            None => {
                debug!("No config file found, using defaults.");
                FileConfig::default()
            }
        };

        Self::resolve(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Merge the layers and validate the result.
    pub fn resolve<E>(
        file: FileConfig,
        env: E,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let token = non_empty(overrides.token)
            .or_else(|| non_empty(env(TOKEN_ENV)))
            .or_else(|| non_empty(file.token))
            .ok_or(ConfigError::MissingToken)?;

        let raw_url = non_empty(overrides.base_url)
            .or_else(|| non_empty(env(BASE_URL_ENV)))
            .or_else(|| non_empty(file.base_url))
            .ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(raw_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
            value: raw_url,
            source,
        })?;

        let out_dir = overrides
            .out_dir
            .or(file.out_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
        if out_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutDir);
        }

        Ok(Self {
            base_url,
            token: token.trim().to_string(),
            out_dir,
            concurrency: overrides
                .concurrency
                .or(file.concurrency)
                .unwrap_or(DEFAULT_CONCURRENCY),
            collision: overrides
                .collision
                .or(file.collision)
                .map(CollisionStrategy::from)
                .unwrap_or_default(),
        })
    }
}

/// Pick the config file to read, if any.
///
/// An explicit path is always returned so that a missing file is reported.
pub fn locate_config_file(
    explicit: Option<&Path>,
    cwd: &Path,
    home: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = cwd.join(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    home.map(|home| home.join(HOME_DIR).join(HOME_CONFIG_FILENAME))
        .filter(|path| path.is_file())
}

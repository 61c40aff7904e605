//! Settings for periodic scrapes, read from `~/.slack_metadata.toml`:
//!
//! ```toml
//! token = "xoxp-..."
//! count = 500
//! log_file = "/var/log/slack_metadata.log"
//! log_level = "info"
//!
//! [[channel]]
//! id = "C0ABCDEF1"
//! start = "1525306421.000207"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;
use slack_api::{ChannelId, Timestamp};
use thiserror::Error;

use crate::scraper::ScrapeRequest;

const CONFIG_FILE_NAME: &str = ".slack_metadata.toml";

/// Used when the config file has no token.
pub const TOKEN_ENV_VAR: &str = "SLACK_API_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no home directory to look for {} in", CONFIG_FILE_NAME)]
    NoHome,
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no token in the config file or ${}", TOKEN_ENV_VAR)]
    MissingToken,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub token: String,
    /// Page size for channels that don't set their own.
    pub count: Option<u32>,
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: LevelFilter,
    #[serde(default, rename = "channel")]
    pub channels: Vec<ChannelConfig>,
}

fn default_log_level() -> LevelFilter {
    LevelFilter::Info
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    pub id: ChannelId,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub count: Option<u32>,
}

impl ChannelConfig {
    pub fn to_request(&self, default_count: Option<u32>) -> ScrapeRequest {
        let mut request = ScrapeRequest::new(self.id);
        request.start = self.start;
        request.end = self.end;
        request.count = self.count.or(default_count);
        request
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Loads the config from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoHome)?;
        Self::load_from(&path)
    }

    /// Loads a config file, taking the token from `$SLACK_API_TOKEN` if the file doesn't set one.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&contents)?;
        if config.token.is_empty() {
            config.token = std::env::var(TOKEN_ENV_VAR).unwrap_or_default();
        }
        config.validate()
    }

    /// Parses a config without consulting the environment.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(self)
    }

    pub fn requests(&self) -> Vec<ScrapeRequest> {
        self.channels
            .iter()
            .map(|channel| channel.to_request(self.count))
            .collect()
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Pause between two requests to the JMA service.
pub const DEFAULT_REQUEST_INTERVAL_MS: u64 = 200;

/// What one download run should fetch, read from a YAML file such as
///
/// ```yaml
/// start_date: 2016-04-12
/// end_date: 2016-05-13
/// resolutions: [10min, hourly, daily]
/// targets: [47401, "47662"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Resolution tokens. Kept as text so an unknown one only skips itself.
    pub resolutions: Vec<String>,
    /// Block numbers of the stations to download. YAML integers are accepted.
    #[serde(deserialize_with = "block_numbers")]
    pub targets: Vec<String>,
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,
    /// Directory that receives the `raw_html/` tree.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

fn default_request_interval_ms() -> u64 {
    DEFAULT_REQUEST_INTERVAL_MS
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Block numbers are digits, and YAML reads bare digits as integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlockNumber {
    Text(String),
    Number(u64),
}

fn block_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<BlockNumber>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|b| match b {
            BlockNumber::Text(s) => s,
            BlockNumber::Number(n) => n.to_string(),
        })
        .collect())
}

impl RunConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.start_date > self.end_date {
            return Err(ConfigError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config")]
    Parse(#[from] serde_yaml::Error),

    #[error("start_date {start} is after end_date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

//! Name list configuration.
//!
//! ```
//! use dnsredir_namelist::SourceListConfig;
//!
//! let config = SourceListConfig::from_json(
//!     r#"{ "paths": ["/etc/dnsredir/ads.conf"], "reload": "30s" }"#,
//! ).unwrap();
//! assert_eq!(config.reload.as_secs(), 30);
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{NamelistError, Result};
use crate::logger::Logger;
use crate::source::{SourceList, SourceListBuilder};

/// Default reload interval: 2 seconds
pub const DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_secs(2);

/// Setup description for a [`SourceList`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceListConfig {
    /// List files, matched in this order
    pub paths: Vec<PathBuf>,
    /// Time between two reloads; zero disables reloading.
    /// Accepts "500ms", "2s", "1m", "1h30m" or a number of seconds.
    #[serde(
        default = "default_reload",
        serialize_with = "serialize_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub reload: Duration,
    /// Fail at setup if a list file is missing
    #[serde(default)]
    pub strict: bool,
}

fn default_reload() -> Duration {
    DEFAULT_RELOAD_INTERVAL
}

impl SourceListConfig {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            reload: DEFAULT_RELOAD_INTERVAL,
            strict: false,
        }
    }

    /// Parse a configuration from JSON
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| NamelistError::ConfigError(e.to_string()))
    }

    /// Builder pre-filled from this configuration
    pub fn builder(&self) -> SourceListBuilder {
        SourceListBuilder::new()
            .paths(self.paths.iter().cloned())
            .reload(self.reload)
            .strict(self.strict)
    }

    /// Check the configured files and create the list
    pub fn build(&self, logger: Logger) -> Result<SourceList> {
        self.builder().logger(logger).build()
    }
}

/// Parse a duration such as "500ms", "2s", "1m", "1h30m", or "0".
///
/// A bare number is a number of seconds.
pub fn parse_duration(spec: &str) -> Result<Duration> {
    let spec = spec.trim();
    let invalid = || NamelistError::InvalidDuration(spec.to_string());

    if spec.is_empty() {
        return Err(invalid());
    }
    if let Ok(secs) = spec.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = spec;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return Err(invalid());
        }
        let value: u64 = rest[..digits].parse().map_err(|_| invalid())?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let part = match &rest[..unit_len] {
            "ms" => Some(Duration::from_millis(value)),
            "s" => Some(Duration::from_secs(value)),
            "m" => value.checked_mul(60).map(Duration::from_secs),
            "h" => value.checked_mul(60 * 60).map(Duration::from_secs),
            _ => None,
        }
        .ok_or_else(invalid)?;
        rest = &rest[unit_len..];

        total = total.checked_add(part).ok_or_else(invalid)?;
    }

    Ok(total)
}

/// Format a duration the way [`parse_duration`] reads it back.
///
/// Sub-millisecond parts round up, so a non-zero interval never comes back as
/// zero (reloading disabled).
pub fn format_duration(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        return format!("{}s", duration.as_secs());
    }
    let millis = duration.as_millis() + u128::from(duration.subsec_nanos() % 1_000_000 != 0);
    format!("{}ms", millis)
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_duration(*duration))
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDuration {
        Secs(u64),
        Text(String),
    }

    match RawDuration::deserialize(deserializer)? {
        RawDuration::Secs(secs) => Ok(Duration::from_secs(secs)),
        RawDuration::Text(text) => parse_duration(&text).map_err(serde::de::Error::custom),
    }
}

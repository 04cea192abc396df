use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::card::{DefaultValueFormatter, ValueFormatter};
use crate::domain::Level;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration for one card sink. Read once at construction, immutable
/// for the sink's lifetime.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkOptions {
    /// Webhook endpoint the cards are posted to.
    pub webhook_url: String,

    /// Events below this level are dropped before aggregation.
    pub minimum_level: Level,

    /// Number of queued events that triggers an early flush in the worker.
    pub batch_size: usize,

    /// Flush period in milliseconds.
    pub flush_interval_ms: u64,

    /// Optional forward proxy for all webhook traffic.
    pub proxy_url: Option<String>,

    /// Static card title.
    pub title: String,

    /// Skip the "Properties" fact section entirely.
    pub omit_properties_section: bool,

    /// Derived from `flush_interval_ms` in `post_process`.
    #[serde(skip)]
    pub flush_interval: Duration,

    /// Formats structured property values; not part of the serialized
    /// configuration.
    #[serde(skip, default = "default_formatter")]
    pub formatter: Arc<dyn ValueFormatter>,
}

fn default_formatter() -> Arc<dyn ValueFormatter> {
    Arc::new(DefaultValueFormatter)
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            minimum_level: Level::Verbose,
            batch_size: 100,
            flush_interval_ms: 2000,
            proxy_url: None,
            title: "Log Event".to_string(),
            omit_properties_section: false,
            flush_interval: Duration::from_millis(2000),
            formatter: default_formatter(),
        }
    }
}

impl SinkOptions {
    /// Options for `webhook_url` with every other field at its default.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Self::default()
        }
    }

    /// Load options from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut options: SinkOptions = toml::from_str(&content)?;
        options.post_process();
        options.validate()?;
        Ok(options)
    }

    /// Derive computed fields from their raw counterparts.
    pub fn post_process(&mut self) {
        self.flush_interval = Duration::from_millis(self.flush_interval_ms);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.webhook_url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "invalid webhook URL '{}': {e}",
                self.webhook_url
            ))
        })?;

        // A blank proxy value counts as absent; anything else must parse.
        if let Some(proxy) = self.proxy_url.as_deref().map(str::trim)
            && !proxy.is_empty()
        {
            Url::parse(proxy)
                .map_err(|e| ConfigError::InvalidUrl(format!("invalid proxy URL '{proxy}': {e}")))?;
        }

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidConfig(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        if self.flush_interval_ms == 0 {
            return Err(ConfigError::InvalidConfig(
                "Flush interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for SinkOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkOptions")
            .field("webhook_url", &self.webhook_url)
            .field("minimum_level", &self.minimum_level)
            .field("batch_size", &self.batch_size)
            .field("flush_interval_ms", &self.flush_interval_ms)
            .field("proxy_url", &self.proxy_url)
            .field("title", &self.title)
            .field("omit_properties_section", &self.omit_properties_section)
            .finish_non_exhaustive()
    }
}

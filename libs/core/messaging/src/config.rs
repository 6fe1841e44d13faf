//! Configuration for event publication.

use core_config::{env_or_default, ConfigError, FromEnv};
use strum::{Display, EnumString};

/// Which backend receives published events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PublisherBackend {
    /// Emit events as tracing records
    #[default]
    Log,
    /// Keep events in process (tests, demos)
    Memory,
    /// Append to Redis Streams (requires the `redis` feature)
    Redis,
}

/// Publisher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    pub backend: PublisherBackend,

    /// Prepended to every topic name (e.g. "staging.")
    pub topic_prefix: String,

    /// Approximate maximum stream length (MAXLEN ~) for stream backends
    pub stream_max_length: i64,

    /// Connection URL, required for the Redis backend only
    pub redis_url: Option<String>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            backend: PublisherBackend::Log,
            topic_prefix: String::new(),
            stream_max_length: 100_000,
            redis_url: None,
        }
    }
}

impl PublisherConfig {
    pub fn new(backend: PublisherBackend) -> Self {
        Self {
            backend,
            ..Default::default()
        }
    }

    /// Set the topic prefix.
    pub fn with_topic_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.topic_prefix = prefix.into();
        self
    }

    /// Set the Redis URL.
    pub fn with_redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = Some(url.into());
        self
    }

    /// Topic for an aggregate family: `project` → `project-events`
    pub fn topic_for(&self, aggregate_type: &str) -> String {
        format!("{}{}-events", self.topic_prefix, aggregate_type)
    }
}

impl FromEnv for PublisherConfig {
    /// Reads from environment variables:
    /// - EVENT_PUBLISHER: log | memory | redis (default: log)
    /// - EVENT_TOPIC_PREFIX: defaults to empty
    /// - EVENT_STREAM_MAX_LEN: defaults to 100000
    /// - REDIS_URL: required when EVENT_PUBLISHER=redis
    fn from_env() -> Result<Self, ConfigError> {
        let backend_raw = env_or_default("EVENT_PUBLISHER", "log");
        let backend: PublisherBackend =
            backend_raw
                .parse()
                .map_err(|e: strum::ParseError| ConfigError::ParseError {
                    key: "EVENT_PUBLISHER".to_string(),
                    details: format!("{} ({})", e, backend_raw),
                })?;

        let topic_prefix = env_or_default("EVENT_TOPIC_PREFIX", "");

        let stream_max_length = env_or_default("EVENT_STREAM_MAX_LEN", "100000")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "EVENT_STREAM_MAX_LEN".to_string(),
                details: format!("{}", e),
            })?;

        let redis_url = match backend {
            PublisherBackend::Redis => Some(core_config::env_required("REDIS_URL")?),
            _ => std::env::var("REDIS_URL").ok(),
        };

        Ok(Self {
            backend,
            topic_prefix,
            stream_max_length,
            redis_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publisher_config_defaults() {
        temp_env::with_vars(
            [
                ("EVENT_PUBLISHER", None::<&str>),
                ("EVENT_TOPIC_PREFIX", None),
                ("EVENT_STREAM_MAX_LEN", None),
                ("REDIS_URL", None),
            ],
            || {
                let config = PublisherConfig::from_env().unwrap();
                assert_eq!(config, PublisherConfig::default());
                assert_eq!(config.topic_for("project"), "project-events");
            },
        );
    }

    #[test]
    fn test_publisher_config_backend_case_insensitive() {
        temp_env::with_var("EVENT_PUBLISHER", Some("MEMORY"), || {
            let config = PublisherConfig::from_env().unwrap();
            assert_eq!(config.backend, PublisherBackend::Memory);
        });
    }

    #[test]
    fn test_publisher_config_unknown_backend() {
        temp_env::with_var("EVENT_PUBLISHER", Some("kafka"), || {
            let err = PublisherConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("EVENT_PUBLISHER"));
        });
    }

    #[test]
    fn test_publisher_config_redis_requires_url() {
        temp_env::with_vars(
            [("EVENT_PUBLISHER", Some("redis")), ("REDIS_URL", None)],
            || {
                let err = PublisherConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "REDIS_URL"));
            },
        );
    }

    #[test]
    fn test_publisher_config_invalid_max_len() {
        temp_env::with_vars(
            [
                ("EVENT_PUBLISHER", None::<&str>),
                ("EVENT_STREAM_MAX_LEN", Some("lots")),
            ],
            || {
                let err = PublisherConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("EVENT_STREAM_MAX_LEN"));
            },
        );
    }

    #[test]
    fn test_topic_prefix() {
        let config = PublisherConfig::new(PublisherBackend::Memory).with_topic_prefix("staging.");
        assert_eq!(config.topic_for("task"), "staging.task-events");
    }
}

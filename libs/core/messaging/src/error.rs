//! Error types for event publication.

use std::fmt;
use thiserror::Error;

/// Error categories, used to label publish failures in logs.
///
/// # Categories
///
/// - **Transient**: the backend was unreachable or timed out
/// - **Permanent**: the event could not be encoded or the publisher is misconfigured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Temporary failure (network timeout, backend unavailable)
    Transient,

    /// Permanent failure (serialization, configuration)
    Permanent,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Transient => write!(f, "transient"),
            ErrorCategory::Permanent => write!(f, "permanent"),
        }
    }
}

/// Error that can occur while publishing a domain event.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Backend rejected or could not receive the event
    #[error("backend unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Redis connection or command error
    #[cfg(feature = "redis")]
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type PublishResult<T> = Result<T, PublishError>;

impl PublishError {
    /// Create an unavailable-backend error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create an unavailable-backend error with a source.
    pub fn unavailable_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            PublishError::Unavailable { .. } => ErrorCategory::Transient,
            PublishError::Serialization(_) => ErrorCategory::Permanent,
            PublishError::Config(_) => ErrorCategory::Permanent,
            #[cfg(feature = "redis")]
            PublishError::Redis(_) => ErrorCategory::Transient,
        }
    }
}

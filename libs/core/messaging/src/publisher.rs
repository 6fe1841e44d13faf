//! Publisher port.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{PublisherBackend, PublisherConfig};
use crate::error::{PublishError, PublishResult};
use crate::event::EventEnvelope;
use crate::publishers::{InMemoryEventPublisher, LoggingEventPublisher};

/// Event publisher trait.
///
/// Implement this trait to forward envelopes to a transport. Implementations
/// report failures through [`PublishError`]; deciding what a failure means for
/// the caller is the dispatcher's job, not the backend's.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one envelope.
    ///
    /// Envelopes sharing a key must be delivered in the order they were
    /// published.
    async fn publish(&self, envelope: &EventEnvelope) -> PublishResult<()>;

    /// Get the publisher name.
    ///
    /// Used for logging.
    fn name(&self) -> &'static str;
}

/// Build the publisher selected by `config.backend`.
pub async fn build_publisher(config: &PublisherConfig) -> PublishResult<Arc<dyn EventPublisher>> {
    match config.backend {
        PublisherBackend::Log => Ok(Arc::new(LoggingEventPublisher::new())),
        PublisherBackend::Memory => Ok(Arc::new(InMemoryEventPublisher::new())),
        PublisherBackend::Redis => build_redis(config).await,
    }
}

#[cfg(feature = "redis")]
async fn build_redis(config: &PublisherConfig) -> PublishResult<Arc<dyn EventPublisher>> {
    let url = config
        .redis_url
        .as_deref()
        .ok_or_else(|| PublishError::Config("REDIS_URL is required for the redis backend".into()))?;

    let publisher = crate::publishers::RedisStreamPublisher::connect(url)
        .await?
        .with_max_length(config.stream_max_length);

    Ok(Arc::new(publisher))
}

#[cfg(not(feature = "redis"))]
async fn build_redis(_config: &PublisherConfig) -> PublishResult<Arc<dyn EventPublisher>> {
    Err(PublishError::Config(
        "redis backend requested but the `redis` feature is disabled".to_string(),
    ))
}

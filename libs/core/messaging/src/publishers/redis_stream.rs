//! Redis Streams backend
//!
//! Each topic is a stream; entries carry the partition key, the event type
//! and the JSON body.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use tracing::debug;

use crate::error::PublishResult;
use crate::event::EventEnvelope;
use crate::publisher::EventPublisher;

/// Publisher appending envelopes to Redis Streams.
pub struct RedisStreamPublisher {
    redis: Arc<ConnectionManager>,
    max_length: i64,
}

impl RedisStreamPublisher {
    pub fn new(redis: ConnectionManager) -> Self {
        Self {
            redis: Arc::new(redis),
            max_length: 100_000,
        }
    }

    /// Open a managed connection to `url`.
    pub async fn connect(url: &str) -> PublishResult<Self> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self::new(manager))
    }

    /// Set the maximum stream length (MAXLEN ~).
    pub fn with_max_length(mut self, max_length: i64) -> Self {
        self.max_length = max_length;
        self
    }
}

#[async_trait]
impl EventPublisher for RedisStreamPublisher {
    async fn publish(&self, envelope: &EventEnvelope) -> PublishResult<()> {
        let mut conn = (*self.redis).clone();

        let body = serde_json::to_string(&envelope.payload)?;

        // XADD with MAXLEN ~ for approximate trimming
        let stream_id: String = redis::cmd("XADD")
            .arg(&envelope.topic)
            .arg("MAXLEN")
            .arg("~")
            .arg(self.max_length)
            .arg("*")
            .arg("key")
            .arg(&envelope.key)
            .arg("type")
            .arg(&envelope.event_type)
            .arg("event")
            .arg(&body)
            .query_async(&mut conn)
            .await?;

        debug!(
            stream = %envelope.topic,
            stream_id = %stream_id,
            key = %envelope.key,
            "Appended event"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

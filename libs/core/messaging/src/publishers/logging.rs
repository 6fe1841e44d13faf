use async_trait::async_trait;
use tracing::info;

use crate::error::PublishResult;
use crate::event::EventEnvelope;
use crate::publisher::EventPublisher;

/// Publisher that emits each envelope as a structured tracing record.
///
/// Default backend when no broker is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, envelope: &EventEnvelope) -> PublishResult<()> {
        info!(
            topic = %envelope.topic,
            key = %envelope.key,
            event_type = %envelope.event_type,
            occurred_at = %envelope.occurred_at,
            payload = %envelope.payload,
            "Domain event"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

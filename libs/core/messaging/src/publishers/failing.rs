use async_trait::async_trait;

use crate::error::{PublishError, PublishResult};
use crate::event::EventEnvelope;
use crate::publisher::EventPublisher;

/// Publisher that rejects every envelope.
///
/// Useful for testing that publication failures stay isolated from the
/// operation that produced the events.
#[derive(Debug, Clone)]
pub struct FailingEventPublisher {
    message: String,
}

impl FailingEventPublisher {
    pub fn new() -> Self {
        Self {
            message: "publisher unavailable".to_string(),
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for FailingEventPublisher {
    async fn publish(&self, _envelope: &EventEnvelope) -> PublishResult<()> {
        Err(PublishError::unavailable(self.message.clone()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

//! Best-effort dispatch of drained aggregate events.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::PublisherConfig;
use crate::event::{DomainEvent, EventEnvelope};
use crate::publisher::EventPublisher;

/// Outcome of one dispatch call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub published: usize,
    pub failed: usize,
}

impl PublishReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Wraps a publisher with topic routing and the fire-and-forget policy.
///
/// Cheap to clone; application services keep one each.
#[derive(Clone)]
pub struct EventDispatcher {
    publisher: Arc<dyn EventPublisher>,
    config: PublisherConfig,
}

impl EventDispatcher {
    pub fn new(publisher: Arc<dyn EventPublisher>, config: PublisherConfig) -> Self {
        Self { publisher, config }
    }

    pub fn publisher(&self) -> &Arc<dyn EventPublisher> {
        &self.publisher
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Publish every event, in order.
    ///
    /// Failures are logged and counted; they are never returned, because the
    /// state change that produced the events is already persisted.
    pub async fn dispatch<E: DomainEvent>(&self, events: Vec<E>) -> PublishReport {
        let mut report = PublishReport::default();

        for event in &events {
            let topic = self.config.topic_for(event.aggregate_type());

            let result = match EventEnvelope::wrap(topic, event) {
                Ok(envelope) => self.publisher.publish(&envelope).await.map(|_| envelope),
                Err(e) => Err(e),
            };

            match result {
                Ok(envelope) => {
                    report.published += 1;
                    debug!(
                        publisher = self.publisher.name(),
                        topic = %envelope.topic,
                        key = %envelope.key,
                        event_type = %envelope.event_type,
                        "Published event"
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        publisher = self.publisher.name(),
                        event_type = event.event_type(),
                        key = %event.partition_key(),
                        category = %e.category(),
                        error = %e,
                        "Failed to publish event"
                    );
                }
            }
        }

        report
    }
}

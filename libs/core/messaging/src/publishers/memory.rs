use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::PublishResult;
use crate::event::EventEnvelope;
use crate::publisher::EventPublisher;

/// In-memory publisher that records every envelope (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventPublisher {
    published: Arc<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self {
            published: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Everything published so far, in publication order
    pub async fn published(&self) -> Vec<EventEnvelope> {
        self.published.read().await.clone()
    }

    /// Event types published so far, in publication order
    pub async fn event_types(&self) -> Vec<String> {
        self.published
            .read()
            .await
            .iter()
            .map(|envelope| envelope.event_type.clone())
            .collect()
    }

    pub async fn clear(&self) {
        self.published.write().await.clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, envelope: &EventEnvelope) -> PublishResult<()> {
        self.published.write().await.push(envelope.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

//! Domain event contract and its wire envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PublishResult;

/// An immutable record of a state change, produced by an aggregate.
///
/// Implementors are usually a struct carrying the aggregate id and the
/// occurrence timestamp plus a tagged `kind` enum with per-kind payload.
///
/// # Example
///
/// ```rust,ignore
/// impl DomainEvent for ProjectEvent {
///     fn aggregate_type(&self) -> &'static str { "project" }
///     fn event_type(&self) -> &'static str { self.kind.event_type() }
///     fn aggregate_id(&self) -> Option<Uuid> { self.project_id }
///     fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
/// }
/// ```
pub trait DomainEvent: Serialize + Send + Sync {
    /// Aggregate family, e.g. `"project"`. Also selects the topic.
    fn aggregate_type(&self) -> &'static str;

    /// Discriminant, e.g. `"project.started"`
    fn event_type(&self) -> &'static str;

    /// Id of the aggregate; `None` only before the store assigned one
    fn aggregate_id(&self) -> Option<Uuid>;

    fn occurred_at(&self) -> DateTime<Utc>;

    /// Key used for ordered delivery per aggregate, e.g. `"project-<id>"`
    fn partition_key(&self) -> String {
        match self.aggregate_id() {
            Some(id) => format!("{}-{}", self.aggregate_type(), id),
            None => format!("{}-unassigned", self.aggregate_type()),
        }
    }
}

/// A serialized domain event, ready for a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Destination topic / stream name
    pub topic: String,
    /// Partition key
    pub key: String,
    pub event_type: String,
    pub aggregate_id: Option<Uuid>,
    pub occurred_at: DateTime<Utc>,
    /// Full event body as JSON
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Wrap an event for the given topic
    pub fn wrap<E: DomainEvent>(topic: impl Into<String>, event: &E) -> PublishResult<Self> {
        Ok(Self {
            topic: topic.into(),
            key: event.partition_key(),
            event_type: event.event_type().to_string(),
            aggregate_id: event.aggregate_id(),
            occurred_at: event.occurred_at(),
            payload: serde_json::to_value(event)?,
        })
    }
}

//! Project domain events

use chrono::{DateTime, Utc};
use messaging::DomainEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Something that happened to a project.
///
/// Serialized flat, with the kind as a `type` discriminant:
///
/// ```json
/// {"project_id":"…","occurred_at":"…","type":"cancelled","name":"Alpha","reason":"budget"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEvent {
    /// `None` only while the project has not been saved yet
    pub project_id: Option<Uuid>,
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ProjectEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProjectEventKind {
    Created { name: String },
    Started { name: String },
    Finished { name: String },
    Cancelled { name: String, reason: Option<String> },
    Updated { name: String },
}

impl ProjectEventKind {
    pub fn event_type(&self) -> &'static str {
        match self {
            ProjectEventKind::Created { .. } => "project.created",
            ProjectEventKind::Started { .. } => "project.started",
            ProjectEventKind::Finished { .. } => "project.finished",
            ProjectEventKind::Cancelled { .. } => "project.cancelled",
            ProjectEventKind::Updated { .. } => "project.updated",
        }
    }
}

impl ProjectEvent {
    pub(crate) fn now(project_id: Option<Uuid>, kind: ProjectEventKind) -> Self {
        Self {
            project_id,
            occurred_at: Utc::now(),
            kind,
        }
    }

    /// Project name at the time of the event
    pub fn name(&self) -> &str {
        match &self.kind {
            ProjectEventKind::Created { name }
            | ProjectEventKind::Started { name }
            | ProjectEventKind::Finished { name }
            | ProjectEventKind::Cancelled { name, .. }
            | ProjectEventKind::Updated { name } => name,
        }
    }
}

impl DomainEvent for ProjectEvent {
    fn aggregate_type(&self) -> &'static str {
        "project"
    }

    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn aggregate_id(&self) -> Option<Uuid> {
        self.project_id
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat_with_type_tag() {
        let id = Uuid::now_v7();
        let event = ProjectEvent::now(
            Some(id),
            ProjectEventKind::Cancelled {
                name: "Alpha".to_string(),
                reason: Some("budget".to_string()),
            },
        );

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "cancelled");
        assert_eq!(json["project_id"], id.to_string());
        assert_eq!(json["name"], "Alpha");
        assert_eq!(json["reason"], "budget");
        assert!(json.get("occurred_at").is_some());

        let back: ProjectEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_domain_event_contract() {
        let id = Uuid::now_v7();
        let event = ProjectEvent::now(
            Some(id),
            ProjectEventKind::Started {
                name: "Alpha".to_string(),
            },
        );

        assert_eq!(event.event_type(), "project.started");
        assert_eq!(event.partition_key(), format!("project-{}", id));
        assert_eq!(event.name(), "Alpha");
    }
}

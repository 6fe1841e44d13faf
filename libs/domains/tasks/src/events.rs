//! Task domain events

use chrono::{DateTime, Utc};
use messaging::DomainEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEvent {
    /// `None` only while the task has not been saved yet
    pub task_id: Option<Uuid>,
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: TaskEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEventKind {
    Created { title: String, project_id: Uuid },
    Started { title: String, project_id: Uuid },
    Finished { title: String, project_id: Uuid },
    Blocked { title: String, reason: Option<String> },
    Unblocked { title: String },
    Updated { title: String },
    PercentChanged { title: String, previous: u8, current: u8 },
}

impl TaskEventKind {
    pub fn event_type(&self) -> &'static str {
        match self {
            TaskEventKind::Created { .. } => "task.created",
            TaskEventKind::Started { .. } => "task.started",
            TaskEventKind::Finished { .. } => "task.finished",
            TaskEventKind::Blocked { .. } => "task.blocked",
            TaskEventKind::Unblocked { .. } => "task.unblocked",
            TaskEventKind::Updated { .. } => "task.updated",
            TaskEventKind::PercentChanged { .. } => "task.percent_changed",
        }
    }
}

impl TaskEvent {
    pub(crate) fn now(task_id: Option<Uuid>, kind: TaskEventKind) -> Self {
        Self {
            task_id,
            occurred_at: Utc::now(),
            kind,
        }
    }

    pub fn title(&self) -> &str {
        match &self.kind {
            TaskEventKind::Created { title, .. }
            | TaskEventKind::Started { title, .. }
            | TaskEventKind::Finished { title, .. }
            | TaskEventKind::Blocked { title, .. }
            | TaskEventKind::Unblocked { title }
            | TaskEventKind::Updated { title }
            | TaskEventKind::PercentChanged { title, .. } => title,
        }
    }
}

impl DomainEvent for TaskEvent {
    fn aggregate_type(&self) -> &'static str {
        "task"
    }

    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn aggregate_id(&self) -> Option<Uuid> {
        self.task_id
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

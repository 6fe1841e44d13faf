use chrono::{Days, NaiveDate, Utc};
use domain_kernel::{AuditInfo, EventBuffer, require_actor, require_max_len, require_text};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::events::{TaskEvent, TaskEventKind};
use crate::status::{TaskPriority, TaskStatus};

pub const TITLE_MAX_LEN: usize = 255;

/// Input for [`Task::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub project_id: Uuid,
    pub owner: String,
}

/// Input for [`Task::update`]; every field replaces the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub owner: String,
}

/// Persisted form of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub completion_percent: u8,
    pub project_id: Uuid,
    pub owner: String,
    pub audit: AuditInfo,
}

/// Task aggregate
///
/// Belongs to a project by id only. Failed operations leave the task and
/// its pending events untouched.
#[derive(Debug, Clone)]
pub struct Task {
    id: Option<Uuid>,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    completion_percent: u8,
    project_id: Uuid,
    owner: String,
    audit: AuditInfo,
    events: EventBuffer<TaskEvent>,
}

pub fn validate_task(title: &str, owner: &str) -> TaskResult<()> {
    require_text("title", title)?;
    require_max_len("title", title, TITLE_MAX_LEN)?;
    require_text("owner", owner)?;
    Ok(())
}

fn check_percent(value: i32) -> TaskResult<u8> {
    u8::try_from(value)
        .ok()
        .filter(|percent| *percent <= 100)
        .ok_or_else(|| {
            TaskError::Validation(format!("percent must be between 0 and 100 (got {})", value))
        })
}

impl Task {
    /// Create a new OPEN task at 0%, buffering a `Created` event
    pub fn create(input: NewTask, actor: &str) -> TaskResult<Self> {
        require_actor(actor)?;
        validate_task(&input.title, &input.owner)?;

        let mut task = Self {
            id: None,
            title: input.title,
            description: input.description,
            status: TaskStatus::Open,
            priority: input.priority,
            due_date: input.due_date,
            completion_percent: 0,
            project_id: input.project_id,
            owner: input.owner,
            audit: AuditInfo::new(actor),
            events: EventBuffer::new(),
        };

        task.record(TaskEventKind::Created {
            title: task.title.clone(),
            project_id: task.project_id,
        });
        Ok(task)
    }

    /// Rehydrate a persisted task; no events are buffered
    pub fn restore(record: TaskRecord) -> TaskResult<Self> {
        validate_task(&record.title, &record.owner)?;
        check_percent(i32::from(record.completion_percent))?;

        Ok(Self {
            id: Some(record.id),
            title: record.title,
            description: record.description,
            status: record.status,
            priority: record.priority,
            due_date: record.due_date,
            completion_percent: record.completion_percent,
            project_id: record.project_id,
            owner: record.owner,
            audit: record.audit,
            events: EventBuffer::new(),
        })
    }

    pub fn start(&mut self, actor: &str) -> TaskResult<()> {
        require_actor(actor)?;
        self.ensure_transition(TaskStatus::InProgress, "start")?;

        self.set_status(TaskStatus::InProgress, actor);
        self.record(TaskEventKind::Started {
            title: self.title.clone(),
            project_id: self.project_id,
        });
        Ok(())
    }

    /// Complete the task; the percent jumps to 100
    pub fn finish(&mut self, actor: &str) -> TaskResult<()> {
        require_actor(actor)?;
        self.ensure_transition(TaskStatus::Completed, "finish")?;

        self.completion_percent = 100;
        self.set_status(TaskStatus::Completed, actor);
        self.record_finished();
        Ok(())
    }

    /// Only OPEN and IN_PROGRESS tasks can be blocked
    pub fn block(&mut self, reason: Option<&str>, actor: &str) -> TaskResult<()> {
        require_actor(actor)?;
        if !self.status.is_active() {
            return Err(self.invalid("block"));
        }

        self.set_status(TaskStatus::Blocked, actor);
        self.record(TaskEventKind::Blocked {
            title: self.title.clone(),
            reason: reason.map(str::to_string),
        });
        Ok(())
    }

    /// Resume a blocked task as IN_PROGRESS
    pub fn unblock(&mut self, actor: &str) -> TaskResult<()> {
        require_actor(actor)?;
        if !self.status.is_blocked() {
            return Err(self.invalid("unblock"));
        }

        self.set_status(TaskStatus::InProgress, actor);
        self.record(TaskEventKind::Unblocked {
            title: self.title.clone(),
        });
        Ok(())
    }

    /// Set the completion percent.
    ///
    /// Reaching 100 while active completes the task and records `Finished`
    /// instead of `PercentChanged`.
    pub fn update_percent(&mut self, value: i32, actor: &str) -> TaskResult<()> {
        require_actor(actor)?;
        if self.status.is_final() {
            return Err(self.invalid("update percent of"));
        }
        let current = check_percent(value)?;

        let previous = self.completion_percent;
        self.completion_percent = current;

        if current == 100 && self.status.is_active() {
            self.set_status(TaskStatus::Completed, actor);
            self.record_finished();
        } else {
            self.audit = self.audit.touched(actor);
            self.record(TaskEventKind::PercentChanged {
                title: self.title.clone(),
                previous,
                current,
            });
        }
        Ok(())
    }

    pub fn update(&mut self, changes: TaskChanges, actor: &str) -> TaskResult<()> {
        require_actor(actor)?;
        if self.status.is_final() {
            return Err(self.invalid("update"));
        }
        validate_task(&changes.title, &changes.owner)?;

        self.title = changes.title;
        self.description = changes.description;
        self.priority = changes.priority;
        self.due_date = changes.due_date;
        self.owner = changes.owner;
        self.audit = self.audit.touched(actor);
        self.record(TaskEventKind::Updated {
            title: self.title.clone(),
        });
        Ok(())
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Utc::now().date_naive())
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && !self.status.is_final(),
            None => false,
        }
    }

    pub fn is_due_within(&self, days: u32) -> bool {
        self.is_due_within_on(days, Utc::now().date_naive())
    }

    /// Due between `today` and `today + days`, both inclusive, and not final
    pub fn is_due_within_on(&self, days: u32, today: NaiveDate) -> bool {
        let Some(due) = self.due_date else {
            return false;
        };
        if self.status.is_final() || due < today {
            return false;
        }
        match today.checked_add_days(Days::new(u64::from(days))) {
            Some(horizon) => due <= horizon,
            None => true,
        }
    }

    /// Set the store-assigned id and stamp it on pending events that lack one
    pub fn assign_id(&mut self, id: Uuid) {
        let id = *self.id.get_or_insert(id);
        for event in self.events.iter_mut() {
            event.task_id.get_or_insert(id);
        }
    }

    pub fn events(&self) -> &[TaskEvent] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<TaskEvent> {
        self.events.drain()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn to_record(&self) -> Option<TaskRecord> {
        Some(TaskRecord {
            id: self.id?,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            completion_percent: self.completion_percent,
            project_id: self.project_id,
            owner: self.owner.clone(),
            audit: self.audit.clone(),
        })
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn completion_percent(&self) -> u8 {
        self.completion_percent
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn ensure_transition(&self, target: TaskStatus, action: &'static str) -> TaskResult<()> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> TaskError {
        TaskError::InvalidTransition {
            from: self.status,
            action,
        }
    }

    fn set_status(&mut self, target: TaskStatus, actor: &str) {
        debug!(task_id = ?self.id, from = %self.status, to = %target, "Task transition");
        self.status = target;
        self.audit = self.audit.touched(actor);
    }

    fn record_finished(&mut self) {
        self.record(TaskEventKind::Finished {
            title: self.title.clone(),
            project_id: self.project_id,
        });
    }

    fn record(&mut self, kind: TaskEventKind) {
        self.events.record(TaskEvent::now(self.id, kind));
    }
}

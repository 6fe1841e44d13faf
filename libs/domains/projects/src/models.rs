use chrono::{NaiveDate, Utc};
use domain_kernel::{AuditInfo, EventBuffer, require_actor, require_max_len, require_text};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::events::{ProjectEvent, ProjectEventKind};
use crate::status::ProjectStatus;

pub const NAME_MAX_LEN: usize = 200;

/// Input for [`Project::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub owner: String,
}

/// Input for [`Project::update`]; every field replaces the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub name: String,
    pub description: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub owner: String,
}

/// Persisted form of a project, used to rehydrate it with [`Project::restore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub owner: String,
    pub audit: AuditInfo,
}

/// Project aggregate
///
/// State only changes through the named operations below. Each one checks
/// the actor and the current status first, so a failed call leaves the
/// project (and its pending events) exactly as it was.
#[derive(Debug, Clone)]
pub struct Project {
    id: Option<Uuid>,
    name: String,
    description: Option<String>,
    status: ProjectStatus,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    owner: String,
    audit: AuditInfo,
    events: EventBuffer<ProjectEvent>,
}

/// Field invariants, checked on creation, update and restore
pub fn validate_project(
    name: &str,
    owner: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> ProjectResult<()> {
    require_text("name", name)?;
    require_max_len("name", name, NAME_MAX_LEN)?;
    require_text("owner", owner)?;

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start > end {
            return Err(ProjectError::Validation(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
    }

    Ok(())
}

impl Project {
    /// Create a new project in PLANNING, buffering a `Created` event
    pub fn create(input: NewProject, actor: &str) -> ProjectResult<Self> {
        require_actor(actor)?;
        validate_project(&input.name, &input.owner, input.start_date, input.end_date)?;

        let mut project = Self {
            id: None,
            name: input.name,
            description: input.description,
            status: ProjectStatus::Planning,
            start_date: input.start_date,
            end_date: input.end_date,
            owner: input.owner,
            audit: AuditInfo::new(actor),
            events: EventBuffer::new(),
        };

        project.record(ProjectEventKind::Created {
            name: project.name.clone(),
        });
        Ok(project)
    }

    /// Rehydrate a persisted project; no events are buffered
    pub fn restore(record: ProjectRecord) -> ProjectResult<Self> {
        validate_project(
            &record.name,
            &record.owner,
            record.start_date,
            record.end_date,
        )?;

        Ok(Self {
            id: Some(record.id),
            name: record.name,
            description: record.description,
            status: record.status,
            start_date: record.start_date,
            end_date: record.end_date,
            owner: record.owner,
            audit: record.audit,
            events: EventBuffer::new(),
        })
    }

    pub fn start(&mut self, actor: &str) -> ProjectResult<()> {
        self.transition(ProjectStatus::InProgress, "start", actor)?;
        self.record(ProjectEventKind::Started {
            name: self.name.clone(),
        });
        Ok(())
    }

    pub fn finish(&mut self, actor: &str) -> ProjectResult<()> {
        self.transition(ProjectStatus::Completed, "finish", actor)?;
        self.record(ProjectEventKind::Finished {
            name: self.name.clone(),
        });
        Ok(())
    }

    /// Cancel from any non-final status.
    ///
    /// Deliberately looser than the transition table: only COMPLETED and
    /// CANCELLED refuse cancellation.
    pub fn cancel(&mut self, reason: Option<&str>, actor: &str) -> ProjectResult<()> {
        require_actor(actor)?;
        self.ensure_not_final("cancel")?;

        self.status = ProjectStatus::Cancelled;
        self.audit = self.audit.touched(actor);
        self.record(ProjectEventKind::Cancelled {
            name: self.name.clone(),
            reason: reason.map(str::to_string),
        });
        Ok(())
    }

    /// Replace name, description, end date and owner
    pub fn update(&mut self, changes: ProjectChanges, actor: &str) -> ProjectResult<()> {
        require_actor(actor)?;
        self.ensure_not_final("update")?;
        validate_project(&changes.name, &changes.owner, self.start_date, changes.end_date)?;

        self.name = changes.name;
        self.description = changes.description;
        self.end_date = changes.end_date;
        self.owner = changes.owner;
        self.audit = self.audit.touched(actor);
        self.record(ProjectEventKind::Updated {
            name: self.name.clone(),
        });
        Ok(())
    }

    /// Past its end date and still open
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Utc::now().date_naive())
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.end_date {
            Some(end) => end < today && !self.status.is_final(),
            None => false,
        }
    }

    /// Set the store-assigned id and stamp it on pending events that lack one.
    ///
    /// An id that is already set is kept.
    pub fn assign_id(&mut self, id: Uuid) {
        let id = *self.id.get_or_insert(id);
        for event in self.events.iter_mut() {
            event.project_id.get_or_insert(id);
        }
    }

    pub fn events(&self) -> &[ProjectEvent] {
        self.events.events()
    }

    /// Drain pending events (read all + clear)
    pub fn take_events(&mut self) -> Vec<ProjectEvent> {
        self.events.drain()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Copy of the persisted state, without pending events
    pub fn to_record(&self) -> Option<ProjectRecord> {
        Some(ProjectRecord {
            id: self.id?,
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            owner: self.owner.clone(),
            audit: self.audit.clone(),
        })
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn transition(
        &mut self,
        target: ProjectStatus,
        action: &'static str,
        actor: &str,
    ) -> ProjectResult<()> {
        require_actor(actor)?;
        if !self.status.can_transition_to(target) {
            return Err(ProjectError::InvalidTransition {
                from: self.status,
                action,
            });
        }

        debug!(project_id = ?self.id, from = %self.status, to = %target, "Project transition");
        self.status = target;
        self.audit = self.audit.touched(actor);
        Ok(())
    }

    fn ensure_not_final(&self, action: &'static str) -> ProjectResult<()> {
        if self.status.is_final() {
            return Err(ProjectError::InvalidTransition {
                from: self.status,
                action,
            });
        }
        Ok(())
    }

    fn record(&mut self, kind: ProjectEventKind) {
        self.events.record(ProjectEvent::now(self.id, kind));
    }
}

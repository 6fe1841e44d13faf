use chrono::Utc;
use messaging::EventDispatcher;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::commands::{ChangeProjectStatus, CreateProject, UpdateProject};
use crate::error::{ProjectError, ProjectResult};
use crate::models::Project;
use crate::repository::ProjectRepository;
use crate::status::ProjectStatus;

/// Service layer for Project use cases
///
/// Each mutating method loads one project, applies a single domain
/// operation, saves it and then hands the drained events to the dispatcher.
#[derive(Clone)]
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
    events: EventDispatcher,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: R, events: EventDispatcher) -> Self {
        Self::with_shared(Arc::new(repository), events)
    }

    /// Build a service over a repository that is also used elsewhere
    pub fn with_shared(repository: Arc<R>, events: EventDispatcher) -> Self {
        Self { repository, events }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_project(&self, input: CreateProject) -> ProjectResult<Uuid> {
        input.validate()?;

        if self.repository.exists_by_name(&input.name).await? {
            return Err(ProjectError::DuplicateName(input.name));
        }

        let project = Project::create(input.to_new_project(), &input.created_by)?;
        let saved = self.persist_and_publish(project).await?;

        saved
            .id()
            .ok_or_else(|| ProjectError::Internal("store returned a project without id".into()))
    }

    #[instrument(skip(self, input), fields(project_id = %input.id))]
    pub async fn update_project(&self, input: UpdateProject) -> ProjectResult<Project> {
        input.validate()?;

        let mut project = self.get_project(input.id).await?;
        project.update(input.to_changes(), &input.updated_by)?;

        self.persist_and_publish(project).await
    }

    /// Apply a status change given as a raw token.
    ///
    /// Only IN_PROGRESS, COMPLETED and CANCELLED can be requested; other
    /// statuses are not reachable through this use case.
    #[instrument(skip(self, input), fields(project_id = %input.id, status = %input.status))]
    pub async fn change_status(&self, input: ChangeProjectStatus) -> ProjectResult<Project> {
        input.validate()?;
        let target = ProjectStatus::parse(&input.status)?;

        let mut project = self.get_project(input.id).await?;
        let actor = input.changed_by.as_str();

        match target {
            ProjectStatus::InProgress => project.start(actor)?,
            ProjectStatus::Completed => project.finish(actor)?,
            ProjectStatus::Cancelled => project.cancel(input.reason.as_deref(), actor)?,
            ProjectStatus::Planning | ProjectStatus::Paused => {
                return Err(ProjectError::Validation(format!(
                    "unsupported status change: {}",
                    target
                )));
            }
        }

        self.persist_and_publish(project).await
    }

    /// Delete a project that is no longer planned or running
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: Uuid, actor: &str) -> ProjectResult<()> {
        domain_kernel::require_actor(actor)?;

        let project = self.get_project(id).await?;
        if project.status().is_active() {
            return Err(ProjectError::InvalidTransition {
                from: project.status(),
                action: "delete",
            });
        }

        if !self.repository.delete(id).await? {
            return Err(ProjectError::NotFound(id));
        }

        tracing::info!(project_id = %id, deleted_by = actor, "Project deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_project(&self, id: Uuid) -> ProjectResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    /// Projects past their end date as of today
    #[instrument(skip(self))]
    pub async fn overdue_projects(&self) -> ProjectResult<Vec<Project>> {
        self.repository.list_overdue(Utc::now().date_naive()).await
    }

    async fn persist_and_publish(&self, project: Project) -> ProjectResult<Project> {
        let mut saved = self.repository.save(project).await?;

        let report = self.events.dispatch(saved.take_events()).await;
        if !report.is_complete() {
            tracing::warn!(
                project_id = ?saved.id(),
                published = report.published,
                failed = report.failed,
                "Project saved but some events were not published"
            );
        }

        Ok(saved)
    }
}

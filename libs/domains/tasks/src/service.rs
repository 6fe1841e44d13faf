use chrono::Utc;
use domain_projects::ProjectRepository;
use messaging::EventDispatcher;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::commands::{ChangeTaskStatus, CreateTask, UpdatePercent, UpdateTask};
use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task, TaskChanges};
use crate::repository::TaskRepository;
use crate::status::{TaskPriority, TaskStatus};

/// Service layer for Task use cases
///
/// Reads projects only to check that a new task has a live owner project.
#[derive(Clone)]
pub struct TaskService<R: TaskRepository, P: ProjectRepository> {
    tasks: Arc<R>,
    projects: Arc<P>,
    events: EventDispatcher,
}

impl<R: TaskRepository, P: ProjectRepository> TaskService<R, P> {
    pub fn new(tasks: R, projects: Arc<P>, events: EventDispatcher) -> Self {
        Self::with_shared(Arc::new(tasks), projects, events)
    }

    pub fn with_shared(tasks: Arc<R>, projects: Arc<P>, events: EventDispatcher) -> Self {
        Self {
            tasks,
            projects,
            events,
        }
    }

    #[instrument(skip(self, input), fields(project_id = %input.project_id, title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Uuid> {
        input.validate()?;
        let priority = TaskPriority::parse(&input.priority)?;

        let project = self
            .projects
            .find_by_id(input.project_id)
            .await?
            .ok_or(TaskError::ProjectNotFound(input.project_id))?;
        if project.status().is_final() {
            return Err(TaskError::ProjectFinalized(input.project_id));
        }

        let task = Task::create(
            NewTask {
                title: input.title,
                description: input.description,
                priority,
                due_date: input.due_date,
                project_id: input.project_id,
                owner: input.owner,
            },
            &input.created_by,
        )?;
        let saved = self.persist_and_publish(task).await?;

        saved
            .id()
            .ok_or_else(|| TaskError::Internal("store returned a task without id".into()))
    }

    #[instrument(skip(self, input), fields(task_id = %input.id))]
    pub async fn update_task(&self, input: UpdateTask) -> TaskResult<Task> {
        input.validate()?;
        let priority = TaskPriority::parse(&input.priority)?;

        let mut task = self.get_task(input.id).await?;
        task.update(
            TaskChanges {
                title: input.title,
                description: input.description,
                priority,
                due_date: input.due_date,
                owner: input.owner,
            },
            &input.updated_by,
        )?;

        self.persist_and_publish(task).await
    }

    /// Apply a status change given as a raw token.
    ///
    /// IN_PROGRESS resumes a blocked task and starts any other one.
    #[instrument(skip(self, input), fields(task_id = %input.id, status = %input.status))]
    pub async fn change_status(&self, input: ChangeTaskStatus) -> TaskResult<Task> {
        input.validate()?;
        let target = TaskStatus::parse(&input.status)?;

        let mut task = self.get_task(input.id).await?;
        let actor = input.changed_by.as_str();

        match target {
            TaskStatus::InProgress if task.status().is_blocked() => task.unblock(actor)?,
            TaskStatus::InProgress => task.start(actor)?,
            TaskStatus::Completed => task.finish(actor)?,
            TaskStatus::Blocked => task.block(input.reason.as_deref(), actor)?,
            TaskStatus::Open | TaskStatus::Cancelled => {
                return Err(TaskError::Validation(format!(
                    "unsupported status change: {}",
                    target
                )));
            }
        }

        self.persist_and_publish(task).await
    }

    #[instrument(skip(self, input), fields(task_id = %input.id, percent = input.percent))]
    pub async fn update_percent(&self, input: UpdatePercent) -> TaskResult<Task> {
        input.validate()?;

        let mut task = self.get_task(input.id).await?;
        task.update_percent(input.percent, &input.updated_by)?;

        self.persist_and_publish(task).await
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: Uuid, actor: &str) -> TaskResult<()> {
        domain_kernel::require_actor(actor)?;

        if !self.tasks.delete(id).await? {
            return Err(TaskError::NotFound(id));
        }

        tracing::info!(task_id = %id, deleted_by = actor, "Task deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_task(&self, id: Uuid) -> TaskResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn high_priority_tasks(&self) -> TaskResult<Vec<Task>> {
        self.tasks.list_high_priority().await
    }

    /// Open tasks due between today and `days` from now
    #[instrument(skip(self))]
    pub async fn tasks_due_within(&self, days: u32) -> TaskResult<Vec<Task>> {
        let today = Utc::now().date_naive();
        let mut due = Vec::new();

        for status in [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Blocked] {
            let tasks = self.tasks.list_by_status(status).await?;
            due.extend(
                tasks
                    .into_iter()
                    .filter(|task| task.is_due_within_on(days, today)),
            );
        }

        due.sort_by_key(|task| task.due_date());
        Ok(due)
    }

    async fn persist_and_publish(&self, task: Task) -> TaskResult<Task> {
        let mut saved = self.tasks.save(task).await?;

        let report = self.events.dispatch(saved.take_events()).await;
        if !report.is_complete() {
            tracing::warn!(
                task_id = ?saved.id(),
                published = report.published,
                failed = report.failed,
                "Task saved but some events were not published"
            );
        }

        Ok(saved)
    }
}

//! Scripted lifecycle run by `tracker demo`

use chrono::{Days, NaiveDate, Utc};
use domain_projects::{
    ChangeProjectStatus, CreateProject, InMemoryProjectRepository, ProjectRecord, ProjectService,
};
use domain_tasks::{
    ChangeTaskStatus, CreateTask, InMemoryTaskRepository, TaskRecord, TaskRepository, TaskService,
    UpdatePercent,
};
use eyre::{Result, WrapErr, eyre};
use messaging::EventDispatcher;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const ACTOR: &str = "tracker-demo";

/// Final state printed by the demo
#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub project: ProjectRecord,
    pub tasks: Vec<TaskRecord>,
    pub high_priority: Vec<Uuid>,
    pub due_soon: Vec<Uuid>,
    pub due_within_days: u32,
}

pub async fn run(events: EventDispatcher, project_name: &str, due_within: u32) -> Result<DemoReport> {
    let project_store = Arc::new(InMemoryProjectRepository::new());
    let task_store = Arc::new(InMemoryTaskRepository::new());

    let projects = ProjectService::with_shared(project_store.clone(), events.clone());
    let tasks = TaskService::with_shared(task_store.clone(), project_store, events);

    let today = Utc::now().date_naive();

    let project_id = projects
        .create_project(CreateProject {
            name: project_name.to_string(),
            description: Some("Demo project".to_string()),
            start_date: Some(today),
            end_date: Some(days_from(today, 14)?),
            owner: "A".to_string(),
            created_by: ACTOR.to_string(),
        })
        .await
        .wrap_err("Failed to create project")?;
    projects
        .change_status(project_status(project_id, "IN_PROGRESS"))
        .await?;
    info!(%project_id, "Project started");

    let main_task = tasks
        .create_task(CreateTask {
            title: "T1".to_string(),
            description: Some("Main deliverable".to_string()),
            priority: "ALTA".to_string(),
            due_date: Some(days_from(today, 3)?),
            project_id,
            owner: "B".to_string(),
            created_by: ACTOR.to_string(),
        })
        .await
        .wrap_err("Failed to create task")?;
    let follow_up = tasks
        .create_task(CreateTask {
            title: "Write report".to_string(),
            description: None,
            priority: "MEDIA".to_string(),
            due_date: Some(days_from(today, 5)?),
            project_id,
            owner: "B".to_string(),
            created_by: ACTOR.to_string(),
        })
        .await
        .wrap_err("Failed to create follow-up task")?;

    tasks
        .change_status(task_status(main_task, "BLOCKED", Some("waiting on review")))
        .await?;
    tasks
        .change_status(task_status(main_task, "IN_PROGRESS", None))
        .await?;
    for percent in [50, 100] {
        tasks
            .update_percent(UpdatePercent {
                id: main_task,
                percent,
                updated_by: ACTOR.to_string(),
            })
            .await?;
    }
    info!(task_id = %main_task, "Task completed through percent updates");

    tasks
        .change_status(task_status(follow_up, "IN_PROGRESS", None))
        .await?;

    let project = projects
        .change_status(project_status(project_id, "COMPLETED"))
        .await?;
    info!(%project_id, status = %project.status(), "Project finished");

    let high_priority = tasks
        .high_priority_tasks()
        .await?
        .iter()
        .filter_map(|task| task.id())
        .collect();
    let due_soon = tasks
        .tasks_due_within(due_within)
        .await?
        .iter()
        .filter_map(|task| task.id())
        .collect();

    let task_records = task_store
        .list_by_project(project_id)
        .await?
        .iter()
        .filter_map(|task| task.to_record())
        .collect();

    Ok(DemoReport {
        project: project
            .to_record()
            .ok_or_else(|| eyre!("saved project has no id"))?,
        tasks: task_records,
        high_priority,
        due_soon,
        due_within_days: due_within,
    })
}

fn days_from(today: NaiveDate, days: u64) -> Result<NaiveDate> {
    today
        .checked_add_days(Days::new(days))
        .ok_or_else(|| eyre!("date out of range"))
}

fn project_status(id: Uuid, status: &str) -> ChangeProjectStatus {
    ChangeProjectStatus {
        id,
        status: status.to_string(),
        reason: None,
        changed_by: ACTOR.to_string(),
    }
}

fn task_status(id: Uuid, status: &str, reason: Option<&str>) -> ChangeTaskStatus {
    ChangeTaskStatus {
        id,
        status: status.to_string(),
        reason: reason.map(str::to_string),
        changed_by: ACTOR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_projects::ProjectStatus;
    use domain_tasks::TaskStatus;
    use messaging::{InMemoryEventPublisher, PublisherConfig};

    #[tokio::test]
    async fn test_demo_runs_full_lifecycle() {
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let events = EventDispatcher::new(publisher.clone(), PublisherConfig::default());

        let report = run(events, "Alpha", 7).await.unwrap();

        assert_eq!(report.project.status, ProjectStatus::Completed);
        assert_eq!(report.tasks.len(), 2);

        let main = report.tasks.iter().find(|t| t.title == "T1").unwrap();
        assert_eq!(main.status, TaskStatus::Completed);
        assert_eq!(main.completion_percent, 100);
        assert_eq!(report.high_priority, vec![main.id]);

        let follow_up = report
            .tasks
            .iter()
            .find(|t| t.title == "Write report")
            .unwrap();
        assert_eq!(report.due_soon, vec![follow_up.id]);

        let types = publisher.event_types().await;
        assert_eq!(
            types,
            vec![
                "project.created",
                "project.started",
                "task.created",
                "task.created",
                "task.blocked",
                "task.unblocked",
                "task.percent_changed",
                "task.finished",
                "task.started",
                "project.finished",
            ]
        );
    }
}

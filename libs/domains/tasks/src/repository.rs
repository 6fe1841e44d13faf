use async_trait::async_trait;
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskRecord};
use crate::status::TaskStatus;

/// Repository trait for Task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert or replace a task, assigning an id on first save
    async fn save(&self, task: Task) -> TaskResult<Task>;

    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>>;

    async fn delete(&self, id: Uuid) -> TaskResult<bool>;

    async fn list_by_project(&self, project_id: Uuid) -> TaskResult<Vec<Task>>;

    async fn list_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>>;

    async fn list_by_owner(&self, owner: &str) -> TaskResult<Vec<Task>>;

    async fn list_overdue(&self, today: NaiveDate) -> TaskResult<Vec<Task>>;

    /// HIGH and CRITICAL tasks, highest weight first
    async fn list_high_priority(&self) -> TaskResult<Vec<Task>>;

    async fn count_by_status(&self, status: TaskStatus) -> TaskResult<usize>;

    async fn count_by_project(&self, project_id: Uuid) -> TaskResult<usize>;
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<Uuid, TaskRecord>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn select<F>(&self, predicate: F) -> TaskResult<Vec<Task>>
    where
        F: Fn(&TaskRecord) -> bool,
    {
        let tasks = self.tasks.read().await;

        let mut records: Vec<&TaskRecord> = tasks.values().filter(|t| predicate(t)).collect();
        records.sort_by_key(|record| record.id);

        records
            .into_iter()
            .map(|record| Task::restore(record.clone()))
            .collect()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, mut task: Task) -> TaskResult<Task> {
        let id = task.id().unwrap_or_else(Uuid::now_v7);
        task.assign_id(id);

        let record = task
            .to_record()
            .ok_or_else(|| TaskError::Internal(format!("task {} has no id", id)))?;

        let mut tasks = self.tasks.write().await;
        if tasks.insert(id, record).is_none() {
            tracing::info!(task_id = %id, project_id = %task.project_id(), "Created task");
        } else {
            tracing::info!(task_id = %id, status = %task.status(), "Updated task");
        }
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        tasks.get(&id).cloned().map(Task::restore).transpose()
    }

    async fn delete(&self, id: Uuid) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;

        if tasks.remove(&id).is_some() {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_by_project(&self, project_id: Uuid) -> TaskResult<Vec<Task>> {
        self.select(|t| t.project_id == project_id).await
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>> {
        self.select(|t| t.status == status).await
    }

    async fn list_by_owner(&self, owner: &str) -> TaskResult<Vec<Task>> {
        self.select(|t| t.owner == owner).await
    }

    async fn list_overdue(&self, today: NaiveDate) -> TaskResult<Vec<Task>> {
        self.select(|t| !t.status.is_final() && t.due_date.is_some_and(|due| due < today))
            .await
    }

    async fn list_high_priority(&self) -> TaskResult<Vec<Task>> {
        let mut tasks = self.select(|t| t.priority.is_high()).await?;
        // stable sort keeps id order within a weight
        tasks.sort_by_key(|t| Reverse(t.priority().weight()));
        Ok(tasks)
    }

    async fn count_by_status(&self, status: TaskStatus) -> TaskResult<usize> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().filter(|t| t.status == status).count())
    }

    async fn count_by_project(&self, project_id: Uuid) -> TaskResult<usize> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().filter(|t| t.project_id == project_id).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTask;
    use crate::status::TaskPriority;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_task(title: &str, project_id: Uuid, priority: TaskPriority) -> Task {
        Task::create(
            NewTask {
                title: title.to_string(),
                description: None,
                priority,
                due_date: Some(date(2024, 6, 10)),
                project_id,
                owner: "B".to_string(),
            },
            "u1",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryTaskRepository::new();
        let project_id = Uuid::now_v7();

        let saved = repo
            .save(new_task("T1", project_id, TaskPriority::High))
            .await
            .unwrap();
        let id = saved.id().unwrap();
        assert_eq!(saved.events()[0].task_id, Some(id));

        let fetched = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.title(), "T1");
        assert_eq!(fetched.project_id(), project_id);
        assert!(fetched.events().is_empty());

        assert!(repo.delete(id).await.unwrap());
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(!repo.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_project_queries() {
        let repo = InMemoryTaskRepository::new();
        let alpha = Uuid::now_v7();
        let beta = Uuid::now_v7();

        repo.save(new_task("T1", alpha, TaskPriority::Low)).await.unwrap();
        repo.save(new_task("T2", alpha, TaskPriority::Medium)).await.unwrap();
        repo.save(new_task("T3", beta, TaskPriority::Low)).await.unwrap();

        assert_eq!(repo.list_by_project(alpha).await.unwrap().len(), 2);
        assert_eq!(repo.count_by_project(alpha).await.unwrap(), 2);
        assert_eq!(repo.count_by_project(beta).await.unwrap(), 1);
        assert_eq!(repo.count_by_status(TaskStatus::Open).await.unwrap(), 3);
        assert_eq!(repo.list_by_owner("B").await.unwrap().len(), 3);
        assert!(repo.list_by_owner("Z").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_high_priority_orders_by_weight() {
        let repo = InMemoryTaskRepository::new();
        let project_id = Uuid::now_v7();

        repo.save(new_task("high", project_id, TaskPriority::High))
            .await
            .unwrap();
        repo.save(new_task("low", project_id, TaskPriority::Low))
            .await
            .unwrap();
        repo.save(new_task("critical", project_id, TaskPriority::Critical))
            .await
            .unwrap();

        let titles: Vec<String> = repo
            .list_high_priority()
            .await
            .unwrap()
            .iter()
            .map(|t| t.title().to_string())
            .collect();

        assert_eq!(titles, vec!["critical", "high"]);
    }

    #[tokio::test]
    async fn test_list_overdue_and_by_status() {
        let repo = InMemoryTaskRepository::new();
        let project_id = Uuid::now_v7();

        let mut started = repo
            .save(new_task("T1", project_id, TaskPriority::Medium))
            .await
            .unwrap();
        started.start("u1").unwrap();
        repo.save(started).await.unwrap();
        repo.save(new_task("T2", project_id, TaskPriority::Medium))
            .await
            .unwrap();

        assert_eq!(repo.list_overdue(date(2024, 6, 11)).await.unwrap().len(), 2);
        assert!(repo.list_overdue(date(2024, 6, 10)).await.unwrap().is_empty());

        let in_progress = repo.list_by_status(TaskStatus::InProgress).await.unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].title(), "T1");
    }
}

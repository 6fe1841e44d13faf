use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{Project, ProjectRecord};
use crate::status::ProjectStatus;

/// Repository trait for Project persistence
///
/// Stores keep project state only. Pending events travel with the value
/// returned by [`ProjectRepository::save`] and are never persisted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert or replace a project, assigning an id on first save
    async fn save(&self, project: Project) -> ProjectResult<Project>;

    async fn find_by_id(&self, id: Uuid) -> ProjectResult<Option<Project>>;

    /// Delete a project by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> ProjectResult<bool>;

    /// Case-insensitive name lookup
    async fn exists_by_name(&self, name: &str) -> ProjectResult<bool>;

    async fn list_by_status(&self, status: ProjectStatus) -> ProjectResult<Vec<Project>>;

    async fn list_by_owner(&self, owner: &str) -> ProjectResult<Vec<Project>>;

    /// Projects past their end date on `today` that are not final
    async fn list_overdue(&self, today: NaiveDate) -> ProjectResult<Vec<Project>>;

    async fn count_by_status(&self, status: ProjectStatus) -> ProjectResult<usize>;
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<Uuid, ProjectRecord>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self {
            projects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn select<F>(&self, predicate: F) -> ProjectResult<Vec<Project>>
    where
        F: Fn(&ProjectRecord) -> bool,
    {
        let projects = self.projects.read().await;

        let mut records: Vec<&ProjectRecord> =
            projects.values().filter(|record| predicate(record)).collect();
        // Oldest first; v7 ids sort by creation time
        records.sort_by_key(|record| record.id);

        records
            .into_iter()
            .map(|record| Project::restore(record.clone()))
            .collect()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn save(&self, mut project: Project) -> ProjectResult<Project> {
        let id = project.id().unwrap_or_else(Uuid::now_v7);
        project.assign_id(id);

        let record = project
            .to_record()
            .ok_or_else(|| ProjectError::Internal(format!("project {} has no id", id)))?;

        let mut projects = self.projects.write().await;
        let created = projects.insert(id, record).is_none();

        if created {
            tracing::info!(project_id = %id, name = %project.name(), "Created project");
        } else {
            tracing::info!(project_id = %id, status = %project.status(), "Updated project");
        }
        Ok(project)
    }

    async fn find_by_id(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        let projects = self.projects.read().await;
        projects.get(&id).cloned().map(Project::restore).transpose()
    }

    async fn delete(&self, id: Uuid) -> ProjectResult<bool> {
        let mut projects = self.projects.write().await;

        if projects.remove(&id).is_some() {
            tracing::info!(project_id = %id, "Deleted project");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_name(&self, name: &str) -> ProjectResult<bool> {
        let projects = self.projects.read().await;
        let name = name.to_lowercase();
        Ok(projects.values().any(|p| p.name.to_lowercase() == name))
    }

    async fn list_by_status(&self, status: ProjectStatus) -> ProjectResult<Vec<Project>> {
        self.select(|p| p.status == status).await
    }

    async fn list_by_owner(&self, owner: &str) -> ProjectResult<Vec<Project>> {
        self.select(|p| p.owner == owner).await
    }

    async fn list_overdue(&self, today: NaiveDate) -> ProjectResult<Vec<Project>> {
        self.select(|p| !p.status.is_final() && p.end_date.is_some_and(|end| end < today))
            .await
    }

    async fn count_by_status(&self, status: ProjectStatus) -> ProjectResult<usize> {
        let projects = self.projects.read().await;
        Ok(projects.values().filter(|p| p.status == status).count())
    }
}

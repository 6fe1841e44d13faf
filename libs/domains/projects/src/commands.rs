//! Commands accepted by [`crate::service::ProjectService`]

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::{NewProject, ProjectChanges};

/// Command for creating a new project
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 100))]
    pub owner: String,
    #[validate(length(min = 1))]
    pub created_by: String,
}

impl CreateProject {
    pub(crate) fn to_new_project(&self) -> NewProject {
        NewProject {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            owner: self.owner.clone(),
        }
    }
}

/// Command for replacing the editable fields of a project
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 100))]
    pub owner: String,
    #[validate(length(min = 1))]
    pub updated_by: String,
}

impl UpdateProject {
    pub(crate) fn to_changes(&self) -> ProjectChanges {
        ProjectChanges {
            name: self.name.clone(),
            description: self.description.clone(),
            end_date: self.end_date,
            owner: self.owner.clone(),
        }
    }
}

/// Command for moving a project to another status.
///
/// `status` is a raw token (`IN_PROGRESS`, `em_andamento`, ...); `reason`
/// is only used when cancelling.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeProjectStatus {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub status: String,
    pub reason: Option<String>,
    #[validate(length(min = 1))]
    pub changed_by: String,
}

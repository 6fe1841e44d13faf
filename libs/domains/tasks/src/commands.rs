//! Commands accepted by [`crate::service::TaskService`]

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Priority token, e.g. `HIGH` or `ALTA`
    #[validate(length(min = 1))]
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub project_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub owner: String,
    #[validate(length(min = 1))]
    pub created_by: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTask {
    pub id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 100))]
    pub owner: String,
    #[validate(length(min = 1))]
    pub updated_by: String,
}

/// `reason` is only used when blocking
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeTaskStatus {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub status: String,
    pub reason: Option<String>,
    #[validate(length(min = 1))]
    pub changed_by: String,
}

/// Range is enforced by the aggregate, not here
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePercent {
    pub id: Uuid,
    pub percent: i32,
    #[validate(length(min = 1))]
    pub updated_by: String,
}

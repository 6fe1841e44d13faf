use domain_kernel::FieldError;
use domain_projects::ProjectError;
use thiserror::Error;
use uuid::Uuid;

use crate::status::TaskStatus;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(Uuid),

    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error("Project {0} is finalized and cannot receive new tasks")]
    ProjectFinalized(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Cannot {action} task with status {from}")]
    InvalidTransition {
        from: TaskStatus,
        action: &'static str,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    /// Input was rejected before any state change
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TaskError::Validation(_) | TaskError::InvalidValue { .. }
        )
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, TaskError::InvalidTransition { .. })
    }
}

impl From<FieldError> for TaskError {
    fn from(err: FieldError) -> Self {
        TaskError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for TaskError {
    fn from(err: validator::ValidationErrors) -> Self {
        TaskError::Validation(err.to_string())
    }
}

/// Errors raised while looking up the owning project
impl From<ProjectError> for TaskError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(id) => TaskError::ProjectNotFound(id),
            ProjectError::Validation(msg) => TaskError::Validation(msg),
            ProjectError::InvalidValue { field, value } => TaskError::InvalidValue { field, value },
            other => TaskError::Internal(other.to_string()),
        }
    }
}

use domain_kernel::FieldError;
use thiserror::Error;
use uuid::Uuid;

use crate::status::ProjectStatus;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    #[error("Project with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Cannot {action} project with status {from}")]
    InvalidTransition {
        from: ProjectStatus,
        action: &'static str,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

impl ProjectError {
    /// Input was rejected before any state change
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ProjectError::Validation(_) | ProjectError::InvalidValue { .. }
        )
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, ProjectError::InvalidTransition { .. })
    }
}

impl From<FieldError> for ProjectError {
    fn from(err: FieldError) -> Self {
        ProjectError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ProjectError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProjectError::Validation(err.to_string())
    }
}

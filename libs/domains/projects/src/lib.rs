//! Projects Domain
//!
//! The Project aggregate, its status machine and the use cases around it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Use cases: load, one domain call, save, publish
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Persistence port + in-memory store
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Project aggregate, status, events
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_projects::{CreateProject, InMemoryProjectRepository, ProjectService};
//! use messaging::{EventDispatcher, LoggingEventPublisher, PublisherConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> domain_projects::ProjectResult<()> {
//! let events = EventDispatcher::new(
//!     Arc::new(LoggingEventPublisher::new()),
//!     PublisherConfig::default(),
//! );
//! let service = ProjectService::new(InMemoryProjectRepository::new(), events);
//!
//! let id = service
//!     .create_project(CreateProject {
//!         name: "Alpha".to_string(),
//!         description: None,
//!         start_date: None,
//!         end_date: None,
//!         owner: "A".to_string(),
//!         created_by: "u1".to_string(),
//!     })
//!     .await?;
//! # let _ = id;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod error;
pub mod events;
pub mod models;
pub mod repository;
pub mod service;
pub mod status;

// Re-export commonly used types
pub use commands::{ChangeProjectStatus, CreateProject, UpdateProject};
pub use error::{ProjectError, ProjectResult};
pub use events::{ProjectEvent, ProjectEventKind};
pub use models::{NewProject, Project, ProjectChanges, ProjectRecord, validate_project};
pub use repository::{InMemoryProjectRepository, ProjectRepository};
pub use service::ProjectService;
pub use status::ProjectStatus;

//! Tasks Domain
//!
//! The Task aggregate: status machine, priority, completion percent and the
//! use cases that drive them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Use cases; checks the owning project on creation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Persistence port + in-memory store
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Task aggregate, status, priority, events
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_projects::InMemoryProjectRepository;
//! use domain_tasks::{InMemoryTaskRepository, TaskService};
//! use messaging::{EventDispatcher, LoggingEventPublisher, PublisherConfig};
//! use std::sync::Arc;
//!
//! let events = EventDispatcher::new(
//!     Arc::new(LoggingEventPublisher::new()),
//!     PublisherConfig::default(),
//! );
//! let projects = Arc::new(InMemoryProjectRepository::new());
//! let service = TaskService::new(InMemoryTaskRepository::new(), projects, events);
//! ```

pub mod commands;
pub mod error;
pub mod events;
pub mod models;
pub mod repository;
pub mod service;
pub mod status;

// Re-export commonly used types
pub use commands::{ChangeTaskStatus, CreateTask, UpdatePercent, UpdateTask};
pub use error::{TaskError, TaskResult};
pub use events::{TaskEvent, TaskEventKind};
pub use models::{NewTask, Task, TaskChanges, TaskRecord, validate_task};
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::TaskService;
pub use status::{TaskPriority, TaskStatus};

//! Domain event publishing abstractions.
//!
//! This library provides backend-agnostic traits and types for forwarding the
//! events an aggregate buffered during a unit of work:
//! - **DomainEvent**: what an event must expose (kind, aggregate id, timestamp)
//! - **EventEnvelope**: the serialized, keyed form handed to a backend
//! - **EventPublisher**: the port implemented by each backend
//! - **EventDispatcher**: best-effort fan-out used by application services
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌─────────────────┐     ┌──────────────────────────┐
//! │ Application      │     │ EventDispatcher │     │ Backends                 │
//! │ service          │────▶│ (envelope, key, │────▶│ LoggingEventPublisher    │
//! │ (after save)     │     │  topic)         │     │ InMemoryEventPublisher   │
//! └──────────────────┘     └─────────────────┘     │ RedisStreamPublisher     │
//!                                                  └──────────────────────────┘
//! ```
//!
//! Publication is fire-and-forget: a backend failure is logged and counted in
//! the [`PublishReport`], it never reaches the caller that triggered the
//! state change.
//!
//! # Example
//!
//! ```ignore
//! use messaging::{EventDispatcher, LoggingEventPublisher, PublisherConfig};
//! use std::sync::Arc;
//!
//! let dispatcher = EventDispatcher::new(
//!     Arc::new(LoggingEventPublisher::new()),
//!     PublisherConfig::default(),
//! );
//!
//! project.assign_id(saved_id);
//! let report = dispatcher.dispatch(project.take_events()).await;
//! ```

mod config;
mod dispatcher;
mod error;
mod event;
mod publisher;
mod publishers;

pub use config::{PublisherBackend, PublisherConfig};
pub use dispatcher::{EventDispatcher, PublishReport};
pub use error::{ErrorCategory, PublishError, PublishResult};
pub use event::{DomainEvent, EventEnvelope};
pub use publisher::{EventPublisher, build_publisher};
pub use publishers::{FailingEventPublisher, InMemoryEventPublisher, LoggingEventPublisher};

#[cfg(feature = "redis")]
pub use publishers::RedisStreamPublisher;

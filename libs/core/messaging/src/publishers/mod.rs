//! Publisher backends.

mod failing;
mod logging;
mod memory;
#[cfg(feature = "redis")]
mod redis_stream;

pub use failing::FailingEventPublisher;
pub use logging::LoggingEventPublisher;
pub use memory::InMemoryEventPublisher;
#[cfg(feature = "redis")]
pub use redis_stream::RedisStreamPublisher;

//! Built-in provider implementations
//!
//! Contains LogProvider, MemoryProvider, and JsonFileProvider. Real backend
//! transports live outside this workspace and implement the
//! `AnalyticsProvider` contract directly.

mod file;
mod log;
mod memory;

pub use self::file::JsonFileProvider;
pub use self::log::LogProvider;
pub use self::memory::{MemoryProvider, RecordedEvent};

//! Cache cleaners for build agents.
//!
//! Providers look for well-known tool caches (Maven, Gradle, NPM, Ivy,
//! sccache, heap dumps, user-listed directories, the agent's persistent
//! cache) and register deferred [`actions::CleanupAction`]s with a
//! [`registry::CleanerRegistry`]. The host decides when to run them, using
//! the timestamp each cleaner was registered with as its staleness hint.

pub mod actions;
pub mod age;
pub mod cleaner;
pub mod config;
pub mod context;
pub mod daemon_logs;
pub mod error;
pub mod providers;
pub mod registry;
pub mod utils;

pub use actions::{CleanupAction, CleanupReport, Outcome};
pub use age::AgeBucket;
pub use cleaner::CleanerProvider;
pub use config::HostConfig;
pub use context::{Os, ProviderContext};
pub use error::{CleanupError, Result};
pub use registry::{CleanerRegistry, InMemoryRegistry, RegisteredCleaner};

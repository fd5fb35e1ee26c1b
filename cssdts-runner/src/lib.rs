//! Orchestration for cssdts: discovery, reporting, batch and watch runs.

mod error;
pub mod discovery;
pub mod orchestrator;
pub mod reporter;

pub use discovery::{Discovery, SourceEvent, Subscription};
pub use error::{DiscoveryError, RunError};
pub use orchestrator::{BatchSummary, Orchestrator, WatchHandle};
pub use reporter::{MemoryReporter, Report, Reporter};

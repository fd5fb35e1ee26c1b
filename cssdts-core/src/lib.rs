//! cssdts core library: configuration, artifacts, output path derivation.
//!
//! Public API surface:
//! - [`config`]: [`Config`] and [`RunMode`]
//! - [`artifact`]: [`Artifact`] and [`fingerprint`]
//! - [`paths`]: output path derivation
//! - [`error`]: [`ConfigError`]

pub mod artifact;
pub mod config;
pub mod error;
pub mod paths;

pub use artifact::{fingerprint, Artifact};
pub use config::{Config, RunMode, DEFAULT_PATTERN, DEFAULT_WATCH_SAVE_DELAY, DECLARATION_SUFFIX};
pub use error::ConfigError;

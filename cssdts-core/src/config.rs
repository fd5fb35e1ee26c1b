//! Process-wide configuration.
//!
//! A [`Config`] is built once (usually from CLI flags), validated, and then
//! shared read-only by every pipeline invocation. There is no global state:
//! the value is handed to the orchestrator at construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::paths;

/// Glob used when no pattern override is given.
pub const DEFAULT_PATTERN: &str = "**/*.css";

/// Save delay applied in watch mode when none is configured.
pub const DEFAULT_WATCH_SAVE_DELAY: Duration = Duration::from_millis(100);

/// Suffix appended to every generated declaration file.
pub const DECLARATION_SUFFIX: &str = ".d.ts";

// ---------------------------------------------------------------------------
// RunMode
// ---------------------------------------------------------------------------

/// Execution mode; fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// Expand the pattern once, process every match, exit.
    Batch,
    /// Process every add/change notification until closed.
    Watch,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Batch => write!(f, "batch"),
            RunMode::Watch => write!(f, "watch"),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Immutable run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base directory every relative path is resolved against.
    pub root_dir: PathBuf,
    /// Directory searched for stylesheets, relative to `root_dir` (or absolute).
    pub search_dir: PathBuf,
    /// Output directory override; declarations land next to sources when `None`.
    pub out_dir: Option<PathBuf>,
    /// Glob pattern, relative to the search directory.
    pub pattern: String,
    /// Convert class tokens to camelCase.
    pub camel_case: bool,
    /// Drop the source extension from output names (`a.css` → `a.d.ts`).
    pub drop_extension: bool,
    /// Write every artifact, bypassing the dirty check.
    pub force: bool,
    /// Suppress all console reporting.
    pub quiet: bool,
    /// Explicit save delay; see [`Config::effective_save_delay`].
    pub save_delay: Option<Duration>,
    /// Run in watch mode instead of batch mode.
    pub watch: bool,
}

impl Config {
    /// Configuration with defaults for everything but the two directories.
    pub fn new(root_dir: impl Into<PathBuf>, search_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            search_dir: search_dir.into(),
            out_dir: None,
            pattern: DEFAULT_PATTERN.to_string(),
            camel_case: false,
            drop_extension: false,
            force: false,
            quiet: false,
            save_delay: None,
            watch: false,
        }
    }

    pub fn with_out_dir(mut self, out_dir: Option<PathBuf>) -> Self {
        self.out_dir = out_dir;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_camel_case(mut self, camel_case: bool) -> Self {
        self.camel_case = camel_case;
        self
    }

    pub fn with_drop_extension(mut self, drop_extension: bool) -> Self {
        self.drop_extension = drop_extension;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_save_delay(mut self, save_delay: Option<Duration>) -> Self {
        self.save_delay = save_delay;
        self
    }

    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    /// Check invariants that cannot be expressed in the type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.trim().is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        if Path::new(&self.pattern).is_absolute() || self.pattern.starts_with('/') {
            return Err(ConfigError::AbsolutePattern {
                pattern: self.pattern.clone(),
            });
        }
        Ok(())
    }

    pub fn mode(&self) -> RunMode {
        if self.watch {
            RunMode::Watch
        } else {
            RunMode::Batch
        }
    }

    /// Save delay used by the dirty checker.
    ///
    /// An explicit value always wins; otherwise batch runs compare immediately
    /// and watch runs wait [`DEFAULT_WATCH_SAVE_DELAY`].
    pub fn effective_save_delay(&self) -> Duration {
        match (self.save_delay, self.mode()) {
            (Some(delay), _) => delay,
            (None, RunMode::Watch) => DEFAULT_WATCH_SAVE_DELAY,
            (None, RunMode::Batch) => Duration::ZERO,
        }
    }

    /// Absolute-or-root-relative directory that sources are discovered in.
    pub fn input_dir(&self) -> PathBuf {
        paths::normalize(&self.root_dir.join(&self.search_dir))
    }

    /// Directory that declarations are written under.
    pub fn output_dir(&self) -> PathBuf {
        let dir = self.out_dir.as_deref().unwrap_or(&self.search_dir);
        paths::normalize(&self.root_dir.join(dir))
    }

    /// Human-readable `search_dir/pattern`, used in the watch banner.
    pub fn display_pattern(&self) -> String {
        self.search_dir
            .join(&self.pattern)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Output path for `source`; see [`paths::output_path`].
    pub fn output_path(&self, source: &Path) -> PathBuf {
        paths::output_path(self, source)
    }
}

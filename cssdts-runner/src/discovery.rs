//! Source discovery: one-shot glob expansion and filesystem subscriptions.
//!
//! Patterns are globs matched against the path relative to the search root.
//! `*` never crosses a `/`, so `*.css` only matches top-level files while
//! `**/*.css` matches at any depth and `styles/*.icss` only directly under
//! `styles/`. Brace alternation (`*.{css,pcss}`) is supported.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use notify::event::{ModifyKind, RenameMode};
use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use cssdts_core::Config;

use crate::error::DiscoveryError;

/// A filesystem notification for a matching source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    Added(PathBuf),
    Changed(PathBuf),
}

impl SourceEvent {
    pub fn path(&self) -> &Path {
        match self {
            SourceEvent::Added(path) | SourceEvent::Changed(path) => path,
        }
    }
}

/// Compiled pattern plus the directory it is anchored at.
#[derive(Debug, Clone)]
pub struct Discovery {
    root: PathBuf,
    pattern: String,
    matcher: GlobMatcher,
}

impl Discovery {
    pub fn new(root: impl Into<PathBuf>, pattern: &str) -> Result<Self, DiscoveryError> {
        let root = root.into();
        let glob = GlobBuilder::new(pattern.trim_start_matches("./"))
            .literal_separator(true)
            .build()
            .map_err(|source| DiscoveryError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
        let matcher = glob.compile_matcher();
        Ok(Self {
            root,
            pattern: pattern.to_string(),
            matcher,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, DiscoveryError> {
        Self::new(config.input_dir(), &config.pattern)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether `path` (a file beneath the root) matches the pattern.
    ///
    /// Paths outside the root never match.
    pub fn is_match(&self, path: &Path) -> bool {
        path.strip_prefix(&self.root)
            .map(|rel| self.matcher.is_match(rel))
            .unwrap_or(false)
    }

    /// Every matching file beneath the root, in walk order.
    ///
    /// A missing root yields an empty set.
    pub fn expand(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        if !self.root.exists() {
            tracing::debug!(root = %self.root.display(), "search root missing; nothing to expand");
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let walker = WalkBuilder::new(&self.root).standard_filters(false).build();
        for entry in walker {
            let entry = entry.map_err(|source| DiscoveryError::Walk {
                root: self.root.clone(),
                source,
            })?;
            let is_file = entry.file_type().map(|ty| ty.is_file()).unwrap_or(false);
            if is_file && self.is_match(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        tracing::debug!(
            root = %self.root.display(),
            pattern = %self.pattern,
            matches = paths.len(),
            "expanded pattern"
        );
        Ok(paths)
    }

    /// Start a recursive watcher on the root.
    ///
    /// Events are reported with paths under [`Discovery::root`] even when the
    /// platform reports canonical paths.
    pub fn subscribe(&self) -> Result<Subscription, DiscoveryError> {
        let watch_err = |source| DiscoveryError::Watch {
            root: self.root.clone(),
            source,
        };

        // FSEvents reports real paths (e.g. /private/var/... on macOS).
        let canonical = fs::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone());
        let root = self.root.clone();
        let discovery = self.clone();

        let (tx, events) = mpsc::unbounded_channel();
        let mut watcher: RecommendedWatcher =
            recommended_watcher(move |event: notify::Result<Event>| {
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = %err, "watcher event error");
                        return;
                    }
                };
                for path in event.paths {
                    let path = if canonical == root {
                        path
                    } else {
                        match path.strip_prefix(&canonical) {
                            Ok(rel) => root.join(rel),
                            Err(_) => path.clone(),
                        }
                    };
                    let Some(source_event) = classify(&event.kind, path) else {
                        continue;
                    };
                    let path = source_event.path();
                    if !path.is_file() || !discovery.is_match(path) {
                        continue;
                    }
                    let _ = tx.send(source_event);
                }
            })
            .map_err(watch_err)?;
        watcher
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(watch_err)?;
        tracing::debug!(root = %self.root.display(), "watching search root");

        Ok(Subscription {
            _watcher: Some(watcher),
            events,
        })
    }
}

fn classify(kind: &EventKind, path: PathBuf) -> Option<SourceEvent> {
    match kind {
        EventKind::Create(_) => Some(SourceEvent::Added(path)),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => None,
        EventKind::Modify(ModifyKind::Name(_)) => Some(SourceEvent::Added(path)),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(SourceEvent::Changed(path)),
        _ => None,
    }
}

/// Stream of [`SourceEvent`]s. Dropping it stops the underlying watcher.
pub struct Subscription {
    _watcher: Option<RecommendedWatcher>,
    events: mpsc::UnboundedReceiver<SourceEvent>,
}

impl Subscription {
    /// A subscription fed by hand instead of by the filesystem.
    pub fn channel() -> (mpsc::UnboundedSender<SourceEvent>, Self) {
        let (tx, events) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                _watcher: None,
                events,
            },
        )
    }

    /// Next event; `None` once every sender is gone.
    pub async fn next(&mut self) -> Option<SourceEvent> {
        self.events.recv().await
    }
}

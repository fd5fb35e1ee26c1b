//! The in-memory result of transforming one stylesheet.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::config::Config;

/// Declaration output for one source file plus its diagnostics.
///
/// Created fresh on every transformation and never mutated afterwards; the
/// fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    source_path: PathBuf,
    output_path: PathBuf,
    text: String,
    diagnostics: Vec<String>,
    fingerprint: String,
}

impl Artifact {
    /// Assemble an artifact, deriving the output path from `config`.
    pub fn new(
        config: &Config,
        source_path: impl Into<PathBuf>,
        source_text: &str,
        text: String,
        diagnostics: Vec<String>,
    ) -> Self {
        let source_path = source_path.into();
        let output_path = config.output_path(&source_path);
        Self {
            source_path,
            output_path,
            text,
            diagnostics,
            fingerprint: fingerprint(source_text),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Generated declaration text; empty when the source exports no tokens.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// SHA-256 hex digest of the source text.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// SHA-256 hex digest of `content`.
pub fn fingerprint(content: &str) -> String {
    let mut h = Sha256::new();
    h.update(content.as_bytes());
    hex::encode(h.finalize())
}

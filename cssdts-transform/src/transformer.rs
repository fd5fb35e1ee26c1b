//! [`Transformer`] trait and the default [`ClassTokenTransformer`].

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TransformError;
use crate::scanner::{scan, Segment};
use crate::tokens::{camel_case, validate_identifier};

static CLASS_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(-?[_a-zA-Z\x{80}-\x{10FFFF}][_a-zA-Z0-9\x{80}-\x{10FFFF}-]*)")
        .expect("class selector regex is valid")
});

/// Declaration text and diagnostics produced from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    pub diagnostics: Vec<String>,
}

/// Source text → declaration text.
///
/// Implementations must be pure: the same path and source always yield the
/// same result. `source_path` is only used for context in diagnostics.
pub trait Transformer: Send + Sync {
    fn transform(&self, source_path: &Path, source: &str) -> Result<Transformed, TransformError>;
}

/// Exports every class token as `export const <token>: string;`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassTokenTransformer {
    camel_case: bool,
}

impl ClassTokenTransformer {
    pub fn new(camel_case: bool) -> Self {
        Self { camel_case }
    }

    /// Raw class tokens in first-seen order, without duplicates.
    pub fn tokens(&self, source: &str) -> Result<Vec<String>, TransformError> {
        let mut seen = HashSet::new();
        let mut tokens = Vec::new();
        let mut push = |token: &str| {
            if seen.insert(token.to_string()) {
                tokens.push(token.to_string());
            }
        };

        for segment in scan(source)? {
            match segment {
                Segment::Prelude(prelude) => {
                    if prelude.starts_with('@') || prelude == ":export" {
                        continue;
                    }
                    for cap in CLASS_SELECTOR.captures_iter(&prelude) {
                        push(&cap[1]);
                    }
                }
                Segment::Declaration {
                    text,
                    in_export: true,
                } => {
                    let name = text.split(':').next().unwrap_or_default().trim();
                    if !name.is_empty() {
                        push(name);
                    }
                }
                Segment::Declaration { .. } => {}
            }
        }
        Ok(tokens)
    }
}

impl Transformer for ClassTokenTransformer {
    fn transform(&self, _source_path: &Path, source: &str) -> Result<Transformed, TransformError> {
        let mut out = Transformed::default();
        let mut exported = HashSet::new();

        for token in self.tokens(source)? {
            let name = if self.camel_case {
                camel_case(&token)
            } else {
                token
            };
            // `a-b` and `a_b` collapse to the same camelCase name.
            if !exported.insert(name.clone()) {
                continue;
            }
            match validate_identifier(&name) {
                Ok(()) => {
                    out.text.push_str("export const ");
                    out.text.push_str(&name);
                    out.text.push_str(": string;\n");
                }
                Err(message) => out.diagnostics.push(message),
            }
        }
        Ok(out)
    }
}

//! # cssdts-transform
//!
//! Turns stylesheet text into TypeScript declaration text.
//!
//! The pipeline only depends on the [`Transformer`] trait; the default
//! implementation, [`ClassTokenTransformer`], exports one `string` constant per
//! class token found in selector preludes and `:export` blocks.
//!
//! ## Usage
//!
//! ```rust
//! use std::path::Path;
//! use cssdts_transform::{ClassTokenTransformer, Transformer};
//!
//! let transformer = ClassTokenTransformer::new(true);
//! let out = transformer
//!     .transform(Path::new("button.css"), ".primary-button { color: red; }")
//!     .expect("valid stylesheet");
//! assert_eq!(out.text, "export const primaryButton: string;\n");
//! ```

pub mod error;
mod scanner;
pub mod tokens;
pub mod transformer;

pub use error::TransformError;
pub use transformer::{ClassTokenTransformer, Transformed, Transformer};

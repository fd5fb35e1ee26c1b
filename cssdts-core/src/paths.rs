//! Output path derivation.
//!
//! | Source (search dir `src`) | Flags              | Output                 |
//! |---------------------------|--------------------|------------------------|
//! | `src/a.css`               | (none)             | `src/a.css.d.ts`       |
//! | `src/a.css`               | drop extension     | `src/a.d.ts`           |
//! | `src/ui/b.css`            | out dir `types`    | `types/ui/b.css.d.ts`  |
//!
//! Derivation is purely lexical: the filesystem is never consulted, so the
//! same source and configuration always produce the same path.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::config::{Config, DECLARATION_SUFFIX};

/// Derive the declaration path for `source` under `config`.
///
/// Relative sources are resolved against `config.root_dir`. A source outside
/// the input directory keeps only its file name beneath the output directory.
pub fn output_path(config: &Config, source: &Path) -> PathBuf {
    let source = if source.is_relative() {
        normalize(&config.root_dir.join(source))
    } else {
        normalize(source)
    };

    let input_dir = config.input_dir();
    let relative = match source.strip_prefix(&input_dir) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => source
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| source.clone()),
    };

    let stem = if config.drop_extension {
        relative.with_extension("")
    } else {
        relative
    };

    let mut name: OsString = stem.into_os_string();
    name.push(DECLARATION_SUFFIX);
    config.output_dir().join(PathBuf::from(name))
}

/// Lexically normalise `path`: drop `.` segments and fold `..` into its parent.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

//! Colored console rendering of run reports.

use std::path::{Path, PathBuf};

use colored::Colorize;

use cssdts_runner::{Report, Reporter};

/// Prints reports the way a terminal user expects: writes and the watch
/// banner on stdout, warnings and errors on stderr.
pub struct ConsoleReporter {
    root: PathBuf,
}

impl ConsoleReporter {
    /// Paths under `root` are shown relative to it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, report: Report) {
        match report {
            Report::Watching(pattern) => println!("Watching {pattern}..."),
            Report::Wrote(path) => println!("Wrote {}", self.display(&path).green()),
            Report::Warn { message, .. } => eprintln!("{}", format!("[Warn] {message}").yellow()),
            Report::Error(message) => error(&message),
        }
    }
}

/// Print `message` on the error channel.
pub fn error(message: &str) {
    eprintln!("{}", format!("[Error] {message}").red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_under_root_are_relative() {
        let reporter = ConsoleReporter::new("/work");
        assert_eq!(reporter.display(Path::new("/work/src/a.css.d.ts")), "src/a.css.d.ts");
        assert_eq!(reporter.display(Path::new("/elsewhere/b.d.ts")), "/elsewhere/b.d.ts");
    }
}

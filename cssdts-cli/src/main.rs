//! cssdts: generate TypeScript declarations for CSS Modules.
//!
//! # Usage
//!
//! ```text
//! cssdts [SEARCH_DIR] [-p <glob>] [-o <dir>] [-c] [-d] [-f] [-q] [-w] [-s <ms>]
//! ```
//!
//! Every stylesheet matching `<SEARCH_DIR>/<glob>` gets a sibling
//! `<name>.d.ts` (or one under `--out-dir`) exporting its class names.

mod commands;
mod console;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use cssdts_core::{Config, RunMode, DEFAULT_PATTERN};
use cssdts_runner::Orchestrator;
use cssdts_transform::ClassTokenTransformer;

use console::ConsoleReporter;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "cssdts",
    version,
    about = "Create .d.ts files from CSS Modules class names",
    long_about = None,
)]
struct Cli {
    /// Directory to search for stylesheets.
    search_dir: Option<PathBuf>,

    /// Output directory; declarations are written next to sources by default.
    #[arg(short = 'o', long)]
    out_dir: Option<PathBuf>,

    /// Glob pattern of stylesheets, relative to the search directory.
    #[arg(short = 'p', long)]
    pattern: Option<String>,

    /// Convert CSS class tokens to camelCase.
    #[arg(short = 'c', long)]
    camel_case: bool,

    /// Drop the input file extension from output names.
    #[arg(short = 'd', long)]
    drop_extension: bool,

    /// Write every declaration, even when its content is unchanged.
    #[arg(short = 'f', long)]
    force: bool,

    /// Suppress all console output.
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Keep running and regenerate declarations as stylesheets change.
    #[arg(short = 'w', long)]
    watch: bool,

    /// Milliseconds to wait before comparing an existing declaration.
    #[arg(short = 's', long, value_name = "MS")]
    save_delay: Option<u64>,
}

impl Cli {
    /// Map flags onto a [`Config`]; `None` when there is nothing to search.
    fn config(&self, root: PathBuf) -> Option<Config> {
        let search_dir = match (&self.search_dir, &self.pattern) {
            (Some(dir), _) => dir.clone(),
            (None, Some(_)) => PathBuf::from("./"),
            (None, None) => return None,
        };
        let pattern = self.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);

        Some(
            Config::new(root, search_dir)
                .with_out_dir(self.out_dir.clone())
                .with_pattern(pattern)
                .with_camel_case(self.camel_case)
                .with_drop_extension(self.drop_extension)
                .with_force(self.force)
                .with_quiet(self.quiet)
                .with_save_delay(self.save_delay.map(Duration::from_millis))
                .with_watch(self.watch),
        )
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            if !cli.quiet {
                console::error(&format!("{err:#}"));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let root = std::env::current_dir().context("could not determine working directory")?;
    let Some(config) = cli.config(root.clone()) else {
        Cli::command().print_help().context("failed to print help")?;
        return Ok(ExitCode::SUCCESS);
    };

    let transformer = Arc::new(ClassTokenTransformer::new(config.camel_case));
    let reporter = Arc::new(ConsoleReporter::new(root));
    let orchestrator =
        Orchestrator::new(config, transformer, reporter).context("invalid arguments")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    match orchestrator.config().mode() {
        RunMode::Batch => runtime.block_on(commands::batch::run(&orchestrator)),
        RunMode::Watch => runtime.block_on(commands::watch::run(&orchestrator)),
    }
}

fn init_tracing(quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if quiet { "off" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cssdts").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn flags_map_onto_config() {
        let config = parse(&["src", "-c", "-d", "-f", "-o", "types", "-s", "250", "-w"])
            .config(PathBuf::from("/work"))
            .expect("search dir given");

        assert_eq!(config.search_dir, PathBuf::from("src"));
        assert_eq!(config.out_dir, Some(PathBuf::from("types")));
        assert_eq!(config.pattern, DEFAULT_PATTERN);
        assert!(config.camel_case && config.drop_extension && config.force);
        assert_eq!(config.mode(), RunMode::Watch);
        assert_eq!(config.effective_save_delay(), Duration::from_millis(250));
    }

    #[test]
    fn pattern_alone_searches_current_dir() {
        let config = parse(&["-p", "styles/*.icss"])
            .config(PathBuf::from("/work"))
            .expect("pattern given");
        assert_eq!(config.display_pattern(), "./styles/*.icss");
    }

    #[test]
    fn no_search_dir_and_no_pattern_means_help() {
        assert!(parse(&[]).config(PathBuf::from("/work")).is_none());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}

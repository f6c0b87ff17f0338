//! ebread - read EPUBs as plain text

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ebread::config::{Config, Mode};
use ebread::driver;
use ebread::reflow::{DEFAULT_INDENT, DEFAULT_LINE_WIDTH};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Command Line
// ============================================================================

/// Extract reflowed plain text from the content documents of an EPUB
#[derive(Parser, Debug)]
#[command(name = "ebread", author, version, about, disable_version_flag = true)]
struct Cli {
    /// Write all text to a single file
    #[arg(short = '1', long = "output-file", value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Directory for output files (or for the extracted archive with -x)
    #[arg(short = 'd', long = "output-directory", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Name output files NAME-1, NAME-2, ... (extension kept after the number)
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// Indent every line by NUM spaces
    #[arg(short, long, value_name = "NUM", default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Maximum line length
    #[arg(short = 'l', long = "line-length", value_name = "NUM", default_value_t = DEFAULT_LINE_WIDTH)]
    line_length: usize,

    /// Write text to stdout
    #[arg(short = 'o', long)]
    stdout: bool,

    /// Only extract the archive
    #[arg(short = 'x', long)]
    extract: bool,

    /// Report each document as it is written (default)
    #[arg(short = 'V', long, overrides_with = "quiet")]
    verbose: bool,

    /// Only report warnings and errors
    #[arg(short, long, overrides_with = "verbose")]
    quiet: bool,

    /// Print a one-line usage message
    #[arg(short = 'u', long)]
    usage: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// EPUB file to read
    #[arg(required_unless_present = "usage")]
    epub: Option<PathBuf>,
}

impl Cli {
    fn usage() -> String {
        Cli::command().render_usage().to_string()
    }

    fn into_config(self) -> anyhow::Result<Config> {
        let epub = self.epub.context("no EPUB given")?;
        let mut config = Config::new(epub);
        config.mode = if self.extract { Mode::Extract } else { Mode::Parse };
        config.stdout = self.stdout;
        config.output_file = self.output_file;
        config.output_dir = self.output_dir;
        config.name = self.name;
        config.line_width = self.line_length;
        config.indent = self.indent;
        config.verbose = self.verbose || !self.quiet;
        Ok(config)
    }
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.usage {
        println!("{}", Cli::usage());
        return ExitCode::SUCCESS;
    }
    init_logging(!cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ebread: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Progress and diagnostics go to stderr so text on stdout stays clean.
/// `RUST_LOG` overrides the level picked by `--verbose`/`--quiet`.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.into_config()?.sanitized();
    let summary = driver::run(&config)
        .with_context(|| format!("could not process {}", config.epub.display()))?;
    debug!(?summary, "done");
    Ok(())
}

//! One run of the tool: extract, resolve, reflow

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::config::{Config, Mode};
use crate::dom::XmlDocument;
use crate::epub::{self, Spine};
use crate::output::{OutputNamer, OutputTarget};
use crate::reflow::{reflow, ReflowOptions};
use crate::Result;

/// What a run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files written by extraction
    pub extracted: usize,
    /// Content documents reflowed
    pub written: usize,
    /// Content documents that could not be read or parsed
    pub skipped: usize,
}

/// Run with output paths resolved against the current directory
pub fn run(config: &Config) -> Result<RunSummary> {
    let cwd = env::current_dir()?;
    run_in(config, &cwd)
}

/// Run with output paths resolved against `cwd`
pub fn run_in(config: &Config, cwd: &Path) -> Result<RunSummary> {
    match config.mode {
        Mode::Extract => {
            let dest = config.extract_dir(cwd);
            let extracted = epub::extract(&config.epub, &dest)?;
            info!(files = extracted, dest = %dest.display(), "extracted");
            Ok(RunSummary {
                extracted,
                ..RunSummary::default()
            })
        }
        Mode::Parse => {
            let options = config.reflow_options()?;
            let mut namer = OutputNamer::new(config.name.clone())?;

            // Removed on drop, on error paths too
            let scratch = tempfile::Builder::new().prefix("ebread.").tempdir()?;
            let extracted = epub::extract(&config.epub, scratch.path())?;

            let target = config.target(cwd);
            target.prepare()?;

            let rootfile = epub::find_rootfile(scratch.path())?;
            let spine = Spine::load(&rootfile)?;

            let mut summary = RunSummary {
                extracted,
                ..RunSummary::default()
            };
            for (href, path) in spine.paths() {
                if convert(&path, href, &target, &mut namer, &options, config.verbose)? {
                    summary.written += 1;
                } else {
                    summary.skipped += 1;
                }
            }
            Ok(summary)
        }
    }
}

/// Reflow one content document. `Ok(false)` means it was skipped because it
/// could not be read as markup.
fn convert(
    path: &Path,
    href: &str,
    target: &OutputTarget,
    namer: &mut OutputNamer,
    options: &ReflowOptions,
    verbose: bool,
) -> Result<bool> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(document = href, error = %e, "could not read content document, skipping");
            return Ok(false);
        }
    };
    let doc = match XmlDocument::parse(&bytes) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(document = href, error = %e, "could not parse content document, skipping");
            return Ok(false);
        }
    };

    let mut sink = target.open(namer, href)?;
    if verbose {
        match sink.path() {
            Some(out) => info!("Parsing {href}, writing output to {}", out.display()),
            None => info!("Parsing {href}, writing output to stdout"),
        }
    }
    reflow(&doc, &mut sink, options)?;
    sink.flush()?;
    Ok(true)
}

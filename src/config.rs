//! Run configuration

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::output::{default_output_dir, OutputTarget};
use crate::reflow::{ReflowOptions, DEFAULT_INDENT, DEFAULT_LINE_WIDTH};
use crate::Result;

/// What a run does with the EPUB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Extract, then reflow every spine document to text
    #[default]
    Parse,
    /// Extract the archive and stop
    Extract,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub epub: PathBuf,
    pub mode: Mode,
    /// Write all text to stdout; takes precedence over `output_file`
    pub stdout: bool,
    /// Append all text to this file
    pub output_file: Option<PathBuf>,
    /// Per-document files (or the extracted archive) go here
    pub output_dir: Option<PathBuf>,
    /// Base name for per-document files
    pub name: Option<String>,
    pub line_width: usize,
    pub indent: usize,
    /// Log one progress line per document
    pub verbose: bool,
}

impl Config {
    pub fn new(epub: impl Into<PathBuf>) -> Self {
        Config {
            epub: epub.into(),
            mode: Mode::default(),
            stdout: false,
            output_file: None,
            output_dir: None,
            name: None,
            line_width: DEFAULT_LINE_WIDTH,
            indent: DEFAULT_INDENT,
            verbose: true,
        }
    }

    /// Replace unusable layout values with working ones.
    ///
    /// A line needs room for one character and a hyphen, so widths of 2 or
    /// less fall back to the default; an indent that leaves no such room
    /// falls back to 0.
    pub fn sanitized(mut self) -> Self {
        if self.line_width <= 2 {
            warn!(
                line_width = self.line_width,
                "line length too small, using {DEFAULT_LINE_WIDTH}"
            );
            self.line_width = DEFAULT_LINE_WIDTH;
        }
        if self.indent >= self.line_width - 2 {
            warn!(
                indent = self.indent,
                line_width = self.line_width,
                "indent leaves no room for text, using 0"
            );
            self.indent = 0;
        }
        self
    }

    pub fn reflow_options(&self) -> Result<ReflowOptions> {
        ReflowOptions::new(self.line_width, self.indent)
    }

    /// Where reflowed text goes, relative to `cwd` when no directory was given
    pub fn target(&self, cwd: &Path) -> OutputTarget {
        if self.stdout {
            OutputTarget::Stdout
        } else if let Some(file) = &self.output_file {
            OutputTarget::SingleFile(file.clone())
        } else {
            OutputTarget::Directory(self.output_dir_or_default(cwd))
        }
    }

    /// Destination of an extract-only run
    pub fn extract_dir(&self, cwd: &Path) -> PathBuf {
        self.output_dir_or_default(cwd)
    }

    fn output_dir_or_default(&self, cwd: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&self.epub, cwd))
    }
}

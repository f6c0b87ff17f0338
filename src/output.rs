//! Output destinations for reflowed text
//!
//! Text goes to stdout, to one file that collects every document, or to one
//! file per document inside an output directory. Files are opened in append
//! mode, so re-running over the same destination adds to it.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::Result;

/// Where reflowed text goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// Every document appended to one file
    SingleFile(PathBuf),
    /// One file per document, named by [`OutputNamer`]
    Directory(PathBuf),
}

impl OutputTarget {
    /// Create the directories the target writes into
    pub fn prepare(&self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout => Ok(()),
            OutputTarget::SingleFile(path) => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
                _ => Ok(()),
            },
            OutputTarget::Directory(dir) => fs::create_dir_all(dir),
        }
    }

    /// Open the sink for the next content document
    pub fn open(&self, namer: &mut OutputNamer, href: &str) -> io::Result<Sink> {
        match self {
            OutputTarget::Stdout => Ok(Sink::Stdout(io::stdout().lock())),
            OutputTarget::SingleFile(path) => Sink::append(path.clone()),
            OutputTarget::Directory(dir) => Sink::append(dir.join(namer.next_name(href))),
        }
    }
}

/// Output directory used when none is given: the EPUB's file name without
/// its extension, under `cwd`. If a file already has that name, `.d` is
/// appended.
pub fn default_output_dir(epub: &Path, cwd: &Path) -> PathBuf {
    let stem = epub.file_stem().unwrap_or(epub.as_os_str());
    let dir = cwd.join(stem);
    if dir.is_file() {
        let mut name = stem.to_os_string();
        name.push(".d");
        return cwd.join(name);
    }
    dir
}

/// Reject output names that would escape the output directory
pub fn validate_name(name: &str) -> Result<()> {
    if name.contains('/') {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Names per-document output files.
///
/// With a base name, every document gets `base-N.ext` with `N` counting up
/// from 1 (the extension is everything from the first `.`). Without one, a
/// document is named after its href with the extension replaced by `.txt`.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    name: Option<String>,
    counter: usize,
}

impl OutputNamer {
    pub fn new(name: Option<String>) -> Result<Self> {
        if let Some(name) = &name {
            validate_name(name)?;
        }
        Ok(OutputNamer { name, counter: 0 })
    }

    pub fn next_name(&mut self, href: &str) -> String {
        match &self.name {
            Some(name) => {
                self.counter += 1;
                match name.find('.') {
                    Some(dot) => format!("{}-{}{}", &name[..dot], self.counter, &name[dot..]),
                    None => format!("{name}-{}", self.counter),
                }
            }
            None => {
                let base = href.rsplit('/').next().unwrap_or(href);
                let stem = base.rfind('.').map_or(base, |dot| &base[..dot]);
                format!("{stem}.txt")
            }
        }
    }
}

/// An open destination for one content document
#[derive(Debug)]
pub enum Sink {
    Stdout(io::StdoutLock<'static>),
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
}

impl Sink {
    fn append(path: PathBuf) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Sink::File {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// File written to, `None` for stdout
    pub fn path(&self) -> Option<&Path> {
        match self {
            Sink::Stdout(_) => None,
            Sink::File { path, .. } => Some(path),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(out) => out.write(buf),
            Sink::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.flush(),
            Sink::File { writer, .. } => writer.flush(),
        }
    }
}

//! EPUB archive extraction

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::Result;

/// Extract every entry of `epub` under `dest`, creating directories as
/// needed. Entries whose names would land outside `dest` are skipped.
///
/// Returns the number of files written.
pub fn extract(epub: &Path, dest: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(epub)?);
    let mut archive = ZipArchive::new(reader)?;
    fs::create_dir_all(dest)?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let Some(relative) = entry.enclosed_name() else {
            warn!(name = entry.name(), "skipping archive entry outside extraction dir");
            continue;
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written += 1;
    }

    debug!(files = written, dest = %dest.display(), "extracted archive");
    Ok(written)
}

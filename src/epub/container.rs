//! `META-INF/container.xml` lookup

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dom::XmlDocument;
use crate::error::EpubError;
use crate::Result;

/// Location of the container document inside every EPUB
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Resolve the package document (rootfile) of an extracted EPUB.
pub fn find_rootfile(extract_dir: &Path) -> Result<PathBuf> {
    let container = extract_dir.join(CONTAINER_PATH);
    if !container.is_file() {
        return Err(EpubError::MissingRootfile(CONTAINER_PATH.to_string()).into());
    }

    let doc = XmlDocument::from_path(&container)?;
    let full_path = rootfile_path(&doc)
        .ok_or_else(|| EpubError::MissingRootfile(container.display().to_string()))?;

    let rootfile = extract_dir.join(full_path);
    debug!(rootfile = %rootfile.display(), "found rootfile");
    Ok(rootfile)
}

/// `full-path` of the first `rootfile` element in document order
fn rootfile_path(doc: &XmlDocument) -> Option<&str> {
    doc.doc_order()
        .find(|&id| doc.is_named(id, "rootfile"))
        .and_then(|id| doc.get_attribute(id, "full-path"))
        .filter(|path| !path.is_empty())
}

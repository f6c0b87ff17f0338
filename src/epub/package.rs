//! Package document (OPF) resolution
//!
//! The spine lists content documents in reading order by `idref`; each idref
//! names a manifest `item` whose `href` is relative to the package document.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::dom::{NodeId, XmlDocument};
use crate::error::EpubError;
use crate::Result;

/// Content documents of a package, in reading order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spine {
    content_dir: PathBuf,
    hrefs: Vec<String>,
}

impl Spine {
    /// Read and resolve the package document at `rootfile`
    pub fn load(rootfile: &Path) -> Result<Self> {
        let doc = XmlDocument::from_path(rootfile)?;
        let content_dir = rootfile.parent().map(Path::to_path_buf).unwrap_or_default();
        let spine = Self::from_document(&doc, content_dir)?;

        debug!(documents = spine.len(), dir = %spine.content_dir.display(), "resolved spine");
        Ok(spine)
    }

    /// Map every spine `itemref` to its manifest `href`, in spine order.
    /// `content_dir` is the directory the hrefs are relative to.
    pub fn from_document(
        doc: &XmlDocument,
        content_dir: impl Into<PathBuf>,
    ) -> std::result::Result<Self, EpubError> {
        let manifest = first_named(doc, "manifest").ok_or(EpubError::MissingManifest)?;
        let spine = first_named(doc, "spine").ok_or(EpubError::MissingSpine)?;

        let itemrefs: Vec<NodeId> = doc
            .children(spine)
            .filter(|&id| doc.is_named(id, "itemref"))
            .collect();
        if itemrefs.is_empty() {
            return Err(EpubError::EmptySpine);
        }

        let mut hrefs = Vec::with_capacity(itemrefs.len());
        for itemref in itemrefs {
            let Some(idref) = doc.get_attribute(itemref, "idref") else {
                warn!("spine itemref without idref");
                continue;
            };
            match manifest_href(doc, manifest, idref) {
                Some(href) => hrefs.push(href.to_string()),
                None => warn!(idref, "spine itemref has no manifest item"),
            }
        }

        Ok(Spine {
            content_dir: content_dir.into(),
            hrefs,
        })
    }

    /// Directory holding the package document; hrefs are relative to it
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn hrefs(&self) -> &[String] {
        &self.hrefs
    }

    /// Content document paths, in reading order
    pub fn paths(&self) -> impl Iterator<Item = (&str, PathBuf)> + '_ {
        self.hrefs
            .iter()
            .map(|href| (href.as_str(), self.content_dir.join(href)))
    }

    pub fn len(&self) -> usize {
        self.hrefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hrefs.is_empty()
    }
}

fn first_named(doc: &XmlDocument, name: &str) -> Option<NodeId> {
    doc.doc_order().find(|&id| doc.is_named(id, name))
}

fn manifest_href<'d>(doc: &'d XmlDocument, manifest: NodeId, id: &str) -> Option<&'d str> {
    doc.children(manifest)
        .filter(|&item| doc.is_named(item, "item"))
        .find(|&item| doc.get_attribute(item, "id") == Some(id))
        .and_then(|item| doc.get_attribute(item, "href"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="uid">
  <metadata><dc:title>Book</dc:title></metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="c2" href="text/ch2.xhtml" media-type="application/xhtml+xml"/>
    <item id="c1" href="text/ch1.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="c1"/>
    <itemref idref="missing"/>
    <itemref idref="c2"/>
    <itemref linear="no"/>
  </spine>
</package>"#;

    fn parse(input: &str) -> std::result::Result<Spine, EpubError> {
        Spine::from_document(&XmlDocument::parse(input.as_bytes()).unwrap(), "")
    }

    #[test]
    fn test_spine_order() {
        let spine = parse(OPF).unwrap();
        assert_eq!(spine.hrefs(), ["text/ch1.xhtml", "text/ch2.xhtml"]);
        assert_eq!(spine.content_dir(), Path::new(""));
    }

    #[test]
    fn test_missing_manifest() {
        assert_eq!(
            parse("<package><spine><itemref idref=\"a\"/></spine></package>"),
            Err(EpubError::MissingManifest)
        );
    }

    #[test]
    fn test_missing_spine() {
        assert_eq!(
            parse("<package><manifest/></package>"),
            Err(EpubError::MissingSpine)
        );
    }

    #[test]
    fn test_empty_spine() {
        assert_eq!(
            parse("<package><manifest/><spine> </spine></package>"),
            Err(EpubError::EmptySpine)
        );
    }

    #[test]
    fn test_load_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let oebps = dir.path().join("OEBPS");
        fs::create_dir_all(&oebps).unwrap();
        fs::write(oebps.join("content.opf"), OPF).unwrap();

        let spine = Spine::load(&oebps.join("content.opf")).unwrap();
        assert_eq!(spine.content_dir(), oebps.as_path());
        assert_eq!(spine.len(), 2);

        let paths: Vec<_> = spine.paths().collect();
        assert_eq!(paths[0], ("text/ch1.xhtml", oebps.join("text/ch1.xhtml")));
        assert_eq!(paths[1], ("text/ch2.xhtml", oebps.join("text/ch2.xhtml")));
    }
}

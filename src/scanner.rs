//! Batch scanning of the docs tree for figure references.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;
use crate::rewrite;
use crate::types::FigureRef;

/// One help document's scan result.
pub struct DocumentScan {
    /// Path of the document, relative to the docs directory.
    pub document: PathBuf,
    /// Figure references in discovery order, or the markup error that
    /// stopped the scan. A malformed document is reported, not fatal.
    pub figures: Result<Vec<FigureRef>, Error>,
}

/// Scan every HTML document under the configured docs directory.
/// Results are sorted by document path for deterministic output.
///
/// # Errors
///
/// Returns `Error::Io` if a help document cannot be read.
pub fn scan(root: &Path, config: &Config) -> Result<Vec<DocumentScan>, Error> {
    let docs_dir = root.join(config.docs_dir());
    let mut scans = Vec::new();

    for entry in WalkDir::new(&docs_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| is_help_document(e.path()))
    {
        let doc_path = entry.path();
        let relative = doc_path.strip_prefix(&docs_dir).unwrap_or(doc_path).to_path_buf();

        let content = std::fs::read_to_string(doc_path)?;
        scans.push(DocumentScan {
            document: relative,
            figures: rewrite::scan_figures(&content),
        });
    }

    scans.sort_by(|a, b| a.document.cmp(&b.document));
    Ok(scans)
}

/// HTML files are help documents; everything else in the tree (figures,
/// stylesheets) is not scanned.
fn is_help_document(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html" || ext == "htm")
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn scans_only_html_documents() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("help");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(docs.join("a.html"), r#"<img src="one.png">"#).unwrap();
        std::fs::write(docs.join("b.htm"), "<p>no figures</p>").unwrap();
        std::fs::write(docs.join("style.css"), "body {}").unwrap();

        let config = Config::load(dir.path()).unwrap();
        let scans = scan(dir.path(), &config).unwrap();

        let docs_seen: Vec<&PathBuf> = scans.iter().map(|s| &s.document).collect();
        assert_eq!(docs_seen, vec![&PathBuf::from("a.html"), &PathBuf::from("b.htm")]);
        assert_eq!(scans[0].figures.as_ref().unwrap().len(), 1);
        assert!(scans[1].figures.as_ref().unwrap().is_empty());
    }

    #[test]
    fn malformed_document_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("help");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(docs.join("bad.html"), r#"<img src="noext">"#).unwrap();
        std::fs::write(docs.join("good.html"), r#"<img src="ok.png">"#).unwrap();

        let config = Config::load(dir.path()).unwrap();
        let scans = scan(dir.path(), &config).unwrap();

        assert_eq!(scans.len(), 2);
        assert!(scans[0].figures.is_err());
        assert!(scans[1].figures.is_ok());
    }
}

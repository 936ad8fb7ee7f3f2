//! Filesystem-backed implementations of the viewer's collaborator traits.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::rewrite::ResourceResolver;
use crate::types::{ContentLocator, FigureRef};
use crate::viewer::{ContentFetcher, DefaultDocumentProvider};

/// Fetches help documents from a docs directory. A locator is interpreted
/// as a path relative to that directory.
pub struct FileFetcher {
    docs_dir: PathBuf,
}

impl FileFetcher {
    /// Create a fetcher rooted at the given docs directory.
    pub fn new(docs_dir: &Path) -> Self {
        return Self { docs_dir: docs_dir.to_path_buf() };
    }
}

impl ContentFetcher for FileFetcher {
    /// Read the document named by `locator` from the docs directory.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentNotFound` if the file doesn't exist,
    /// or `Error::Io` for other read failures.
    fn fetch(&self, locator: &ContentLocator) -> Result<String, Error> {
        let path = self.docs_dir.join(&locator.0);
        return match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::DocumentNotFound { path })
            },
            Err(e) => Err(Error::Io(e)),
            Ok(text) => Ok(text),
        };
    }
}

/// Provides the static default page shown when a primary load fails.
pub struct DefaultPage {
    path: PathBuf,
}

impl DefaultPage {
    /// Create a provider for the default document at `path`.
    pub fn new(path: &Path) -> Self {
        return Self { path: path.to_path_buf() };
    }
}

impl DefaultDocumentProvider for DefaultPage {
    /// Read the default document.
    ///
    /// # Errors
    ///
    /// Returns `Error::FallbackUnavailable` on any read failure — the
    /// distinction between not-found and unreadable doesn't matter once
    /// the fallback itself is gone.
    fn fetch(&self) -> Result<String, Error> {
        return std::fs::read_to_string(&self.path).map_err(|e| Error::FallbackUnavailable {
            reason: format!("{}: {e}", self.path.display()),
        });
    }
}

/// Resolves figure references to paths under a configured images directory.
pub struct DirResolver {
    images_dir: PathBuf,
}

impl DirResolver {
    /// Create a resolver rooted at the given images directory.
    pub fn new(images_dir: &Path) -> Self {
        return Self { images_dir: images_dir.to_path_buf() };
    }

    /// The on-disk path a figure resolves to. Used by `check` to verify
    /// that the image actually exists.
    pub fn disk_path(&self, figure: &FigureRef) -> PathBuf {
        return self.images_dir.join(figure.to_string());
    }
}

impl ResourceResolver for DirResolver {
    /// `images_dir/name.extension`, as a renderable path string.
    fn resolve(&self, figure: &FigureRef) -> String {
        return self.disk_path(figure).display().to_string();
    }
}

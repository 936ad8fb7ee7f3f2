use std::path::{Path, PathBuf};

use crate::error::Error;

/// Name of the per-project config file.
const CONFIG_FILE: &str = ".helpview.toml";

/// Project configuration loaded from `.helpview.toml`.
/// All paths are relative to the project root the command runs in.
#[derive(Debug)]
pub struct Config {
    default_document: String,
    docs_dir: PathBuf,
    images_dir: PathBuf,
}

/// Raw TOML structure for `.helpview.toml`.
#[derive(serde::Deserialize)]
struct HelpviewTomlConfig {
    #[serde(default)]
    default_document: Option<String>,
    #[serde(default)]
    docs_dir: Option<PathBuf>,
    #[serde(default)]
    images_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from `.helpview.toml` in the given root directory.
    /// Returns built-in defaults if the file doesn't exist. Returns an error
    /// if the file exists but is malformed — never silently falls back to
    /// defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::defaults()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: HelpviewTomlConfig = toml::from_str(&content)?;
        let defaults = Self::defaults();
        Ok(Self {
            default_document: raw.default_document.unwrap_or(defaults.default_document),
            docs_dir: raw.docs_dir.unwrap_or(defaults.docs_dir),
            images_dir: raw.images_dir.unwrap_or(defaults.images_dir),
        })
    }

    /// Built-in layout: documents in `help/`, figures in `help/figures/`,
    /// `default.html` as the fallback page.
    fn defaults() -> Self {
        Self {
            default_document: "default.html".to_string(),
            docs_dir: PathBuf::from("help"),
            images_dir: PathBuf::from("help/figures"),
        }
    }

    /// Path of the fallback document, under the docs directory.
    pub fn default_document_path(&self) -> PathBuf {
        self.docs_dir.join(&self.default_document)
    }

    /// Directory containing help documents.
    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    /// Directory figure references resolve into.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}

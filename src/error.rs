/// Crate-level error types for helpview diagnostics.
use std::path::PathBuf;

/// All errors in helpview carry enough context to produce a useful diagnostic
/// without a debugger. Each variant names the document, figure, or reason for
/// failure. Nothing here is fatal to the host process: the viewer translates
/// every load failure into a visible fallback or error state.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced help document does not exist at the fetch location.
    #[error("document not found: {}", path.display())]
    DocumentNotFound {
        /// Path the fetcher tried to read.
        path: PathBuf,
    },

    /// The default document could not be fetched either, so the viewer has
    /// nothing to render but the fixed plain-text message.
    #[error("fallback document unavailable: {reason}")]
    FallbackUnavailable {
        /// Description of the fallback fetch failure.
        reason: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// The external browser could not be launched. Non-fatal: reported to
    /// the user but never changes viewer state.
    #[error("could not open `{url}` in browser: {reason}")]
    Launch {
        /// Description of the launch failure.
        reason: String,
        /// The link target that was handed to the launcher.
        url: String,
    },

    /// An `<img src="` marker was found but the value that follows violates
    /// the `name.extension` pattern (no `.` before the closing `"`, or no
    /// closing `"` at all).
    #[error("malformed image tag at byte {offset}: {reason}")]
    MalformedMarkup {
        /// Byte offset of the offending marker in the raw document.
        offset: usize,
        /// Which part of the pattern was violated.
        reason: &'static str,
    },

    /// TOML deserialization of the config file failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}

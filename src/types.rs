/// Core domain types for helpview documents, figures, and viewer state.
use std::fmt;

/// Opaque address of a help document, supplied by the caller.
/// Interpreted by the `ContentFetcher` implementation; the viewer never
/// looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLocator(
    /// The document name or relative path as given by the caller.
    pub String,
);

impl fmt::Display for ContentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

/// Caller classification of a document, used for the viewer title.
/// Which title a document gets is a presentation concern decided at the
/// call site, not derived from document content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// The application's about page.
    About,
    /// Any other help topic.
    Topic,
}

impl DocumentKind {
    /// The surface title shown while this document is displayed.
    pub fn title(self) -> &'static str {
        return match self {
            DocumentKind::About => "About",
            DocumentKind::Topic => "Help",
        };
    }
}

/// The `(name, extension)` pair parsed from an `<img src="...">` value.
/// This is the rewrite key: every occurrence of the same pair is rewritten
/// to the same resolved path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FigureRef {
    /// File extension after the first `.`, without the dot.
    pub extension: String,
    /// Figure name up to the first `.` in the `src` value.
    pub name: String,
}

impl fmt::Display for FigureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}.{}", self.name, self.extension);
    }
}

/// Lifecycle of a single viewer instance.
///
/// `Loading` is the construction state; exactly one of the three displayed
/// states follows, and `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    /// Terminal state — viewer resources released, all requests ignored.
    Closed,
    /// The primary document loaded and rewrote cleanly.
    Displayed,
    /// Both the primary and the fallback fetch failed; a fixed plain-text
    /// message is shown instead of markup.
    ErrorDisplayed,
    /// The primary load failed; the default document is shown verbatim.
    FallbackDisplayed,
    /// Initial state while the document is fetched and rewritten.
    Loading,
}

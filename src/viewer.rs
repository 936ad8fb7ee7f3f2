//! The help viewer state machine: load, rewrite, render, fall back, navigate.
//!
//! A `Viewer` owns one displayed document for its lifetime. Construction
//! performs the whole load synchronously, so exactly one of the displayed
//! states follows `Loading` and a second load request is unrepresentable.
//! Every failure path terminates in a visible, inert state — nothing in
//! here is fatal to the host process.

use crate::error::Error;
use crate::rewrite::{self, ResourceResolver};
use crate::types::{ContentLocator, DocumentKind, ViewerState};

/// The fixed plain-text message shown when both the primary document and
/// the fallback document are unreachable.
pub const HELP_UNAVAILABLE: &str = "The selected help file is not yet available.";

/// Fetches raw document text for a content locator.
pub trait ContentFetcher {
    /// Fetch the unmodified document text.
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentNotFound` or `Error::Io`.
    fn fetch(&self, locator: &ContentLocator) -> Result<String, Error>;
}

/// Fetches the designated default document shown when the primary load fails.
pub trait DefaultDocumentProvider {
    /// Fetch the fallback document text.
    ///
    /// # Errors
    ///
    /// Returns `Error::FallbackUnavailable` if the fallback itself cannot
    /// be fetched.
    fn fetch(&self) -> Result<String, Error>;
}

/// Opens a link target in the system browser.
pub trait BrowserLauncher {
    /// Hand the full link target to the external browser.
    ///
    /// # Errors
    ///
    /// Returns `Error::Launch` — always non-fatal to the viewer.
    fn open(&self, url: &str) -> Result<(), Error>;
}

/// The narrow rendering interface the viewer drives. Window chrome, layout
/// and pointer shape live behind this seam and are not the viewer's concern.
pub trait RenderSurface {
    /// Display a resolved markup document.
    fn render_markup(&mut self, document: &str);
    /// Display plain text with no markup interpretation.
    fn render_plain(&mut self, text: &str);
    /// Scroll to a named in-document anchor. Only meaningful after the
    /// current render has completed layout.
    fn scroll_to(&mut self, anchor: &str);
    /// Set the surface title.
    fn set_title(&mut self, title: &str);
}

/// The load-time collaborators, borrowed for the duration of one load.
pub struct LoadContext<'a> {
    /// Provider of the fallback document.
    pub fallback: &'a dyn DefaultDocumentProvider,
    /// Fetcher for the primary document.
    pub fetcher: &'a dyn ContentFetcher,
    /// Resolver for figure references found in the primary document.
    pub resolver: &'a dyn ResourceResolver,
}

/// One viewer instance: a rendered document plus its lifecycle state.
pub struct Viewer {
    /// Why the primary load failed, when it did. Lets diagnostics name the
    /// real cause even though fetch and rewrite failures both land in the
    /// fallback state.
    last_error: Option<Error>,
    launcher: Box<dyn BrowserLauncher>,
    /// Anchor to scroll to once the current render pass completes.
    /// Consumed exactly once by `complete_render`, then discarded.
    pending_scroll: Option<String>,
    state: ViewerState,
    surface: Box<dyn RenderSurface>,
}

impl Viewer {
    /// Load a document and construct the viewer around the result.
    ///
    /// Fetch and rewrite failures fall through to the fallback document,
    /// rendered verbatim with no rewriting. If the fallback fetch also
    /// fails, a fixed plain-text message is rendered instead of markup.
    /// The anchor, if any, is only honored on the primary path: the
    /// fallback document is not the document it names a location in.
    pub fn open(
        locator: &ContentLocator,
        kind: DocumentKind,
        anchor: Option<&str>,
        ctx: &LoadContext<'_>,
        surface: Box<dyn RenderSurface>,
        launcher: Box<dyn BrowserLauncher>,
    ) -> Self {
        let mut viewer = Self {
            last_error: None,
            launcher,
            pending_scroll: None,
            state: ViewerState::Loading,
            surface,
        };

        let resolved = ctx
            .fetcher
            .fetch(locator)
            .and_then(|raw| rewrite::resolve_images(&raw, ctx.resolver));

        match resolved {
            Ok(document) => {
                viewer.surface.set_title(kind.title());
                viewer.surface.render_markup(&document);
                viewer.state = ViewerState::Displayed;
                viewer.pending_scroll = anchor.map(String::from);
            },
            Err(primary) => {
                viewer.last_error = Some(primary);
                viewer.display_fallback(kind, ctx.fallback);
            },
        }

        viewer
    }

    /// Render the fallback document, or the fixed error text if that fails too.
    fn display_fallback(&mut self, kind: DocumentKind, fallback: &dyn DefaultDocumentProvider) {
        match fallback.fetch() {
            Ok(document) => {
                self.surface.set_title(kind.title());
                self.surface.render_markup(&document);
                self.state = ViewerState::FallbackDisplayed;
            },
            Err(_fallback_err) => {
                self.surface.render_plain(HELP_UNAVAILABLE);
                self.state = ViewerState::ErrorDisplayed;
            },
        }
    }

    /// Run the deferred post-render action.
    ///
    /// The host calls this once the render pass has finished layout; anchor
    /// positions are not resolvable before that. Single-shot: the pending
    /// anchor is consumed on the first call and later calls do nothing.
    pub fn complete_render(&mut self) {
        if self.state != ViewerState::Displayed {
            self.pending_scroll = None;
            return;
        }
        if let Some(anchor) = self.pending_scroll.take() {
            self.surface.scroll_to(&anchor);
        }
    }

    /// Handle a hyperlink activation.
    ///
    /// `#`-prefixed targets scroll to the in-document anchor; anything else
    /// is handed verbatim to the external browser launcher. Ignored unless
    /// a document is displayed. Never changes viewer state.
    ///
    /// # Errors
    ///
    /// Returns `Error::Launch` when the external browser fails to start.
    /// Non-fatal: the caller reports it and the viewer keeps working.
    pub fn activate_link(&mut self, target: &str) -> Result<(), Error> {
        match self.state {
            ViewerState::Displayed | ViewerState::FallbackDisplayed => {},
            _ => return Ok(()),
        }

        if let Some(anchor) = target.strip_prefix('#') {
            self.surface.scroll_to(anchor);
            return Ok(());
        }

        self.launcher.open(target)
    }

    /// Close the viewer and release its resources. Idempotent: a second
    /// close request is a no-op.
    pub fn close(&mut self) {
        if self.state == ViewerState::Closed {
            return;
        }
        self.pending_scroll = None;
        self.state = ViewerState::Closed;
    }

    /// Why the primary load failed, if it did.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ViewerState {
        self.state
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::types::FigureRef;

    /// Everything the mock collaborators observed, in call order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Launched(String),
        RenderedMarkup(String),
        RenderedPlain(String),
        ScrolledTo(String),
        TitleSet(String),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct RecordingSurface(Log);

    impl RenderSurface for RecordingSurface {
        fn render_markup(&mut self, document: &str) {
            self.0.borrow_mut().push(Event::RenderedMarkup(document.to_string()));
        }
        fn render_plain(&mut self, text: &str) {
            self.0.borrow_mut().push(Event::RenderedPlain(text.to_string()));
        }
        fn scroll_to(&mut self, anchor: &str) {
            self.0.borrow_mut().push(Event::ScrolledTo(anchor.to_string()));
        }
        fn set_title(&mut self, title: &str) {
            self.0.borrow_mut().push(Event::TitleSet(title.to_string()));
        }
    }

    struct RecordingLauncher {
        fail: bool,
        log: Log,
    }

    impl BrowserLauncher for RecordingLauncher {
        fn open(&self, url: &str) -> Result<(), Error> {
            self.log.borrow_mut().push(Event::Launched(url.to_string()));
            if self.fail {
                return Err(Error::Launch {
                    reason: "no browser".to_string(),
                    url: url.to_string(),
                });
            }
            Ok(())
        }
    }

    struct StaticFetcher(Option<&'static str>);

    impl ContentFetcher for StaticFetcher {
        fn fetch(&self, locator: &ContentLocator) -> Result<String, Error> {
            match self.0 {
                Some(text) => Ok(text.to_string()),
                None => Err(Error::DocumentNotFound {
                    path: std::path::PathBuf::from(&locator.0),
                }),
            }
        }
    }

    struct StaticFallback(Option<&'static str>);

    impl DefaultDocumentProvider for StaticFallback {
        fn fetch(&self) -> Result<String, Error> {
            match self.0 {
                Some(text) => Ok(text.to_string()),
                None => Err(Error::FallbackUnavailable {
                    reason: "default page missing".to_string(),
                }),
            }
        }
    }

    struct PrefixResolver;

    impl ResourceResolver for PrefixResolver {
        fn resolve(&self, figure: &FigureRef) -> String {
            format!("res/{figure}")
        }
    }

    fn open_viewer(
        primary: Option<&'static str>,
        fallback: Option<&'static str>,
        anchor: Option<&str>,
        launcher_fails: bool,
    ) -> (Viewer, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let fetcher = StaticFetcher(primary);
        let default_page = StaticFallback(fallback);
        let ctx = LoadContext {
            fallback: &default_page,
            fetcher: &fetcher,
            resolver: &PrefixResolver,
        };
        let viewer = Viewer::open(
            &ContentLocator("guide.html".to_string()),
            DocumentKind::Topic,
            anchor,
            &ctx,
            Box::new(RecordingSurface(Rc::clone(&log))),
            Box::new(RecordingLauncher { fail: launcher_fails, log: Rc::clone(&log) }),
        );
        (viewer, log)
    }

    #[test]
    fn successful_load_displays_resolved_document() {
        let (viewer, log) =
            open_viewer(Some(r#"<img src="a.png">"#), Some("fallback"), None, false);

        assert_eq!(viewer.state(), ViewerState::Displayed);
        assert!(viewer.last_error().is_none());
        assert_eq!(
            *log.borrow(),
            vec![
                Event::TitleSet("Help".to_string()),
                Event::RenderedMarkup(r#"<img src="res/a.png">"#.to_string()),
            ]
        );
    }

    #[test]
    fn anchor_scrolls_after_render_completes() {
        let (mut viewer, log) =
            open_viewer(Some("<p>doc</p>"), Some("fallback"), Some("section2"), false);

        // Nothing scrolled yet: the render pass has not completed.
        assert!(!log.borrow().iter().any(|e| matches!(e, Event::ScrolledTo(_))));

        viewer.complete_render();
        assert_eq!(log.borrow().last(), Some(&Event::ScrolledTo("section2".to_string())));

        // Single-shot: a second completion does not scroll again.
        viewer.complete_render();
        let scrolls = log.borrow().iter().filter(|e| matches!(e, Event::ScrolledTo(_))).count();
        assert_eq!(scrolls, 1);
    }

    #[test]
    fn fetch_failure_renders_fallback_verbatim() {
        let (viewer, log) =
            open_viewer(None, Some(r#"<img src="d.png">default"#), None, false);

        assert_eq!(viewer.state(), ViewerState::FallbackDisplayed);
        assert!(matches!(viewer.last_error(), Some(Error::DocumentNotFound { .. })));
        // No rewriting on the fallback path.
        assert!(log.borrow().contains(&Event::RenderedMarkup(
            r#"<img src="d.png">default"#.to_string()
        )));
    }

    #[test]
    fn malformed_markup_renders_fallback() {
        let (viewer, _log) =
            open_viewer(Some(r#"<img src="broken">"#), Some("fallback"), None, false);

        assert_eq!(viewer.state(), ViewerState::FallbackDisplayed);
        assert!(matches!(viewer.last_error(), Some(Error::MalformedMarkup { .. })));
    }

    #[test]
    fn double_failure_renders_fixed_error_text() {
        let (mut viewer, log) = open_viewer(None, None, Some("ignored"), false);

        assert_eq!(viewer.state(), ViewerState::ErrorDisplayed);
        assert!(log.borrow().contains(&Event::RenderedPlain(HELP_UNAVAILABLE.to_string())));

        // The anchor is discarded, not scrolled to.
        viewer.complete_render();
        assert!(!log.borrow().iter().any(|e| matches!(e, Event::ScrolledTo(_))));
    }

    #[test]
    fn anchor_link_scrolls_without_launching() {
        let (mut viewer, log) = open_viewer(Some("doc"), Some("fallback"), None, false);

        viewer.activate_link("#section2").unwrap();

        assert_eq!(viewer.state(), ViewerState::Displayed);
        assert_eq!(log.borrow().last(), Some(&Event::ScrolledTo("section2".to_string())));
        assert!(!log.borrow().iter().any(|e| matches!(e, Event::Launched(_))));
    }

    #[test]
    fn external_link_launches_browser_exactly_once() {
        let (mut viewer, log) = open_viewer(Some("doc"), Some("fallback"), None, false);

        viewer.activate_link("https://example.org").unwrap();

        let count = log
            .borrow()
            .iter()
            .filter(|e| **e == Event::Launched("https://example.org".to_string()))
            .count();
        assert_eq!(count, 1);
        assert_eq!(viewer.state(), ViewerState::Displayed);
    }

    #[test]
    fn launch_failure_is_reported_but_not_fatal() {
        let (mut viewer, _log) = open_viewer(Some("doc"), Some("fallback"), None, true);

        let err = viewer.activate_link("https://example.org").unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
        assert_eq!(viewer.state(), ViewerState::Displayed);

        // The viewer keeps working after a failed launch.
        viewer.activate_link("#still-works").unwrap();
    }

    #[test]
    fn links_are_ignored_after_close() {
        let (mut viewer, log) = open_viewer(Some("doc"), Some("fallback"), None, false);

        viewer.close();
        assert_eq!(viewer.state(), ViewerState::Closed);

        viewer.activate_link("#nope").unwrap();
        viewer.activate_link("https://example.org").unwrap();
        assert!(!log.borrow().iter().any(|e| {
            matches!(e, Event::ScrolledTo(_) | Event::Launched(_))
        }));
    }

    #[test]
    fn close_is_idempotent() {
        let (mut viewer, _log) = open_viewer(Some("doc"), Some("fallback"), Some("a"), false);

        viewer.close();
        viewer.close();
        assert_eq!(viewer.state(), ViewerState::Closed);

        // Pending scroll was discarded on close.
        viewer.complete_render();
        assert_eq!(viewer.state(), ViewerState::Closed);
    }

    #[test]
    fn fallback_viewer_still_navigates() {
        let (mut viewer, log) = open_viewer(None, Some("fallback"), None, false);

        assert_eq!(viewer.state(), ViewerState::FallbackDisplayed);
        viewer.activate_link("#top").unwrap();
        assert_eq!(log.borrow().last(), Some(&Event::ScrolledTo("top".to_string())));
    }
}

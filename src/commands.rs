//! Core CLI commands for helpview: render, check, watch.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::browser::CommandLauncher;
use crate::config::Config;
use crate::diagnostics;
use crate::error::Error;
use crate::render::TextSurface;
use crate::scanner;
use crate::source::{DefaultPage, DirResolver, FileFetcher};
use crate::types::{ContentLocator, DocumentKind, ViewerState};
use crate::viewer::{LoadContext, Viewer};

/// Arguments to the render command, as parsed from the CLI.
pub struct RenderRequest {
    /// Render with the about-page title instead of the help title.
    pub about: bool,
    /// Anchor to scroll to once the document is rendered.
    pub anchor: Option<String>,
    /// Document to load, relative to the docs directory.
    pub file: String,
    /// A link to activate after the render, as if the user clicked it.
    pub follow: Option<String>,
}

/// Load a help document, resolve its figures, and display it.
///
/// Exit code mirrors the state the viewer lands in: displayed (0) >
/// fallback (1) > error text (2).
///
/// # Errors
///
/// Returns errors from config loading only; load failures are displayed,
/// not propagated.
pub fn render(request: &RenderRequest) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;

    let fetcher = FileFetcher::new(&root.join(config.docs_dir()));
    let fallback = DefaultPage::new(&root.join(config.default_document_path()));
    let resolver = DirResolver::new(config.images_dir());
    let ctx = LoadContext {
        fallback: &fallback,
        fetcher: &fetcher,
        resolver: &resolver,
    };

    let kind = if request.about { DocumentKind::About } else { DocumentKind::Topic };
    let mut viewer = Viewer::open(
        &ContentLocator(request.file.clone()),
        kind,
        request.anchor.as_deref(),
        &ctx,
        Box::new(TextSurface::new()),
        Box::new(CommandLauncher),
    );
    viewer.complete_render();

    if let Some(target) = &request.follow
        && let Err(e) = viewer.activate_link(target)
    {
        // Launch failures are reported but never change the outcome.
        diagnostics::print_error(&e);
    }

    if let Some(e) = viewer.last_error() {
        diagnostics::print_error(e);
    }

    return Ok(match viewer.state() {
        ViewerState::Displayed => ExitCode::SUCCESS,
        ViewerState::FallbackDisplayed => ExitCode::from(1),
        _ => ExitCode::from(2),
    });
}

/// A figure reference whose image file does not exist.
struct MissingFigure {
    document: PathBuf,
    figure: String,
}

/// Verify that every figure reference in every help document resolves to
/// an existing image file.
///
/// # Errors
///
/// Returns errors from config loading or document reading.
pub fn check(format: &str) -> Result<ExitCode, Error> {
    let root = PathBuf::from(".");
    let config = Config::load(&root)?;
    let resolver = DirResolver::new(&root.join(config.images_dir()));
    let scans = scanner::scan(&root, &config)?;

    let mut broken: Vec<(PathBuf, String)> = Vec::new();
    let mut missing: Vec<MissingFigure> = Vec::new();
    let mut checked = 0_usize;

    for scan in &scans {
        let figures = match &scan.figures {
            Err(e) => {
                broken.push((scan.document.clone(), e.to_string()));
                continue;
            },
            Ok(figures) => figures,
        };
        for figure in figures {
            checked = checked.saturating_add(1);
            if !resolver.disk_path(figure).exists() {
                missing.push(MissingFigure {
                    document: scan.document.clone(),
                    figure: figure.to_string(),
                });
            }
        }
    }

    if format == "json" {
        print_check_json(scans.len(), checked, &broken, &missing);
    } else {
        print_check_text(scans.len(), checked, &broken, &missing);
    }

    // Exit code priority: broken (2) > missing (1) > clean (0).
    if !broken.is_empty() {
        return Ok(ExitCode::from(2));
    } else if !missing.is_empty() {
        return Ok(ExitCode::from(1));
    } else {
        return Ok(ExitCode::SUCCESS);
    }
}

/// Plain-text check report, one line per finding.
fn print_check_text(
    documents: usize,
    checked: usize,
    broken: &[(PathBuf, String)],
    missing: &[MissingFigure],
) {
    for (document, reason) in broken {
        println!("BROKEN   {} ({reason})", document.display());
    }
    for m in missing {
        println!("MISSING  {}: {}", m.document.display(), m.figure);
    }

    if broken.is_empty() && missing.is_empty() {
        println!("All {checked} figure references in {documents} documents resolve");
        return;
    }

    println!();
    println!("{} broken, {} missing", broken.len(), missing.len());
    return;
}

/// JSON check report for tooling.
fn print_check_json(
    documents: usize,
    checked: usize,
    broken: &[(PathBuf, String)],
    missing: &[MissingFigure],
) {
    let report = serde_json::json!({
        "broken": broken.iter().map(|(document, reason)| {
            return serde_json::json!({
                "document": document.display().to_string(),
                "reason": reason,
            });
        }).collect::<Vec<_>>(),
        "checked_figures": checked,
        "documents": documents,
        "missing": missing.iter().map(|m| {
            return serde_json::json!({
                "document": m.document.display().to_string(),
                "figure": m.figure,
            });
        }).collect::<Vec<_>>(),
    });
    println!("{report:#}");
    return;
}

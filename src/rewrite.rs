//! Image-reference resolution: rewriting `<img src="...">` tags to resolved
//! resource paths.
//!
//! The scan is deliberately literal — no HTML parsing. A figure reference is
//! whatever follows the exact marker `<img src="`: the name runs up to the
//! first `.`, the extension from just after that `.` to the first `"`.
//! Accepted limitations, not bugs: a figure name containing a literal `.`
//! is split at the first one, and a `src` value containing a `"` before the
//! real closing quote is truncated there. Help documents are authored to
//! stay inside these rules.

use std::collections::HashSet;

use crate::error::Error;
use crate::types::FigureRef;

/// The literal marker that opens a rewritable image tag. Tags that do not
/// start with this exact byte sequence (single quotes, extra whitespace,
/// different attribute order) are left untouched.
pub const IMG_MARKER: &str = "<img src=\"";

/// Maps a figure reference to a renderable resource path.
/// Implementations must be deterministic within one load: the same figure
/// must resolve to the same path so that duplicate tags stay identical.
pub trait ResourceResolver {
    /// Resolve a figure reference to a resource path.
    fn resolve(&self, figure: &FigureRef) -> String;
}

/// Scan a raw document left to right and collect every figure reference.
///
/// Duplicates are preserved in discovery order; uniqueness is not required.
/// A document with zero image tags yields an empty vector.
///
/// # Errors
///
/// Returns `Error::MalformedMarkup` if a marker is not followed by a
/// `name.extension"` pattern — a missing `.` or closing `"` is an error,
/// never a silent skip.
pub fn scan_figures(raw: &str) -> Result<Vec<FigureRef>, Error> {
    let mut figures = Vec::new();
    let mut scan_from = 0_usize;

    while let Some(found) = raw.get(scan_from..).and_then(|rest| rest.find(IMG_MARKER)) {
        let marker_at = scan_from + found;
        let value_at = marker_at + IMG_MARKER.len();
        figures.push(parse_figure_at(raw, marker_at, value_at)?);
        // Advance past the marker, not the full value: the scan position is
        // strictly increasing and bounded by the text length.
        scan_from = value_at;
    }

    Ok(figures)
}

/// Rewrite every rewritable image tag in `raw` to its resolved resource path.
///
/// Rewriting is keyed by figure identity, not occurrence position: each
/// distinct `(name, extension)` pair is resolved once and every literal
/// occurrence of `<img src="name.extension` is replaced in a single
/// substitution pass. A second tag referencing the same figure therefore
/// ends up byte-identical to the first. The scan runs over the original
/// text, so a resolved path that happens to contain the marker substring is
/// never re-scanned and the rewrite terminates for any finite input.
///
/// # Errors
///
/// Returns `Error::MalformedMarkup` before any rewriting if the document
/// violates the tag pattern; callers fall through to the fallback document.
pub fn resolve_images<R: ResourceResolver + ?Sized>(
    raw: &str,
    resolver: &R,
) -> Result<String, Error> {
    let figures = scan_figures(raw)?;

    let mut text = raw.to_string();
    let mut seen: HashSet<FigureRef> = HashSet::new();

    for figure in figures {
        if !seen.insert(figure.clone()) {
            continue;
        }
        let resolved = resolver.resolve(&figure);
        let original = format!("{IMG_MARKER}{figure}");
        let replacement = format!("{IMG_MARKER}{resolved}");
        text = text.replace(&original, &replacement);
    }

    Ok(text)
}

/// Parse the `name.extension` pair that follows a marker at `marker_at`.
///
/// # Errors
///
/// Returns `Error::MalformedMarkup` carrying the marker's byte offset if
/// the closing quote or the extension separator is missing.
fn parse_figure_at(raw: &str, marker_at: usize, value_at: usize) -> Result<FigureRef, Error> {
    let rest = raw.get(value_at..).unwrap_or("");

    let Some(quote) = rest.find('"') else {
        return Err(Error::MalformedMarkup {
            offset: marker_at,
            reason: "no closing quote after src value",
        });
    };
    let value = rest.get(..quote).unwrap_or("");

    let Some(dot) = value.find('.') else {
        return Err(Error::MalformedMarkup {
            offset: marker_at,
            reason: "no extension separator before closing quote",
        });
    };

    return Ok(FigureRef {
        extension: value.get(dot.saturating_add(1)..).unwrap_or("").to_string(),
        name: value.get(..dot).unwrap_or("").to_string(),
    });
}

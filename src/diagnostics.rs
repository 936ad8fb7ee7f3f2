use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it.
/// Fetch failures and malformed markup both end in the fallback document,
/// but they are reported distinctly — a missing file and a broken image
/// tag have different fixes.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::DocumentNotFound { path } => format!("\
# Error: Document Not Found

`{}` does not exist.

## Fix

Check the document name, or the `docs_dir` setting in `.helpview.toml`.
", path.display()),

        Error::MalformedMarkup { offset, reason } => format!("\
# Error: Malformed Image Tag

At byte {offset}: {reason}.

Image tags must match `<img src=\"name.extension\"` exactly — figure names
may not contain `.` and src values may not contain `\"`.

## Fix

Correct the image tag in the help document, then run:

    helpview check
"),

        Error::FallbackUnavailable { reason } => format!("\
# Error: Fallback Document Unavailable

{reason}

## Fix

Restore the default document named in `.helpview.toml`.
"),

        Error::Launch { url, reason } => format!("\
# Error: Browser Launch Failed

Could not open `{url}`: {reason}

The viewer is unaffected; the link was simply not opened.
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Correct `.helpview.toml` — an absent file is fine, a malformed one is not.
"),
    }
}

//! Terminal render surface: prints documents and reports scroll targets.

use regex::Regex;

use crate::viewer::RenderSurface;

/// A `RenderSurface` that writes to stdout. Markup is printed as-is — this
/// surface is for inspecting resolved documents, not laying them out — and
/// scroll requests are reported as the line number of the matching anchor.
pub struct TextSurface {
    /// The currently displayed document, kept so anchors can be located
    /// after the render.
    document: String,
    /// Matches `<a name="...">` and bare `id="..."` anchor declarations.
    pattern: Regex,
}

impl TextSurface {
    /// Create an empty surface.
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded anchor regex is invalid (compile-time invariant).
    pub fn new() -> Self {
        Self {
            document: String::new(),
            pattern: Regex::new(r#"<a\s+name="([^"]+)"|id="([^"]+)""#).expect("valid regex"),
        }
    }

    /// One-based line number of the first anchor declaration matching `anchor`.
    fn anchor_line(&self, anchor: &str) -> Option<usize> {
        for (idx, line) in self.document.lines().enumerate() {
            for cap in self.pattern.captures_iter(line) {
                let name = cap.get(1).or_else(|| cap.get(2));
                if name.is_some_and(|m| m.as_str() == anchor) {
                    return Some(idx.saturating_add(1));
                }
            }
        }
        None
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for TextSurface {
    fn render_markup(&mut self, document: &str) {
        self.document = document.to_string();
        println!("{document}");
    }

    fn render_plain(&mut self, text: &str) {
        self.document.clear();
        println!("{text}");
    }

    fn scroll_to(&mut self, anchor: &str) {
        match self.anchor_line(anchor) {
            Some(line) => println!("-> anchor `{anchor}` at line {line}"),
            None => eprintln!("anchor `{anchor}` not found in document"),
        }
    }

    fn set_title(&mut self, title: &str) {
        println!("== {title} ==");
    }
}

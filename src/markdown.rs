//! Markdown body rendering.
//!
//! Long-form bodies are converted to HTML through a [`MarkdownRenderer`].
//! Rendering has its own, narrower failure domain: when it fails, the
//! assembler keeps the record and puts [`RENDER_ERROR_PLACEHOLDER`] in its
//! `content` field instead of falling back to default content. Title,
//! slug and the other metadata are still worth showing.

use pulldown_cmark::{Options, Parser, html};
use thiserror::Error;

/// Shown in place of the rendered body when conversion fails.
pub const RENDER_ERROR_PLACEHOLDER: &str =
    "<p class=\"content-error\">This content is temporarily unavailable.</p>";

#[derive(Error, Debug, Clone, PartialEq)]
#[error("markdown rendering failed: {0}")]
pub struct RenderError(pub String);

/// Converts a markdown body to HTML.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// CommonMark plus the GitHub-style extensions CMS editors expect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownRenderer;

impl PulldownRenderer {
    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(markdown, Self::options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

/// Render `markdown`, substituting the placeholder on failure.
///
/// Returns the HTML and, if rendering failed, the error for the caller to log.
pub fn render_or_placeholder(
    renderer: &dyn MarkdownRenderer,
    markdown: &str,
) -> (String, Option<RenderError>) {
    if markdown.trim().is_empty() {
        return (String::new(), None);
    }
    match renderer.render(markdown) {
        Ok(html) => (html, None),
        Err(err) => (RENDER_ERROR_PLACEHOLDER.to_string(), Some(err)),
    }
}

//! Markdown to HTML.
//!
//! Plain CommonMark, no extensions, raw HTML passed through untouched. Raw
//! HTML is the escape hatch for anything CommonMark lacks (`<del>`, `<sup>`,
//! embeds), so it is never escaped or sanitized.

use pulldown_cmark::{Options, Parser, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    /// For [`Renderer`] implementations that can fail. [`CommonMark`] never
    /// does: pulldown-cmark renders any input.
    #[error("markdown renderer failed: {0}")]
    Failed(String),
}

/// Converts a whole markdown document to an HTML fragment.
pub trait Renderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// pulldown-cmark in strict CommonMark mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMark;

impl Renderer for CommonMark {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(markdown, Options::empty());
        let mut body = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut body, parser);
        Ok(body)
    }
}

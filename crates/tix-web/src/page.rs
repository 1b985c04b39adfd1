#![forbid(unsafe_code)]

//! Page documents.
//!
//! A page is a title plus an ordered list of blocks, usually loaded from
//! JSON:
//!
//! ```json
//! {"title": "Tonight", "blocks": [{"type": "hero", "props": {"title": "Tonight"}}]}
//! ```
//!
//! [`render_page`] turns it into a complete HTML5 document whose `<main>`
//! holds one rendered block per line.

use std::fmt;

use serde::{Deserialize, Serialize};
use tix_widgets::blocks::{Block, RenderContext, render_blocks};
use tix_widgets::node::{Node, escape_html};

/// A page description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    #[must_use]
    pub fn new(title: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            blocks,
        }
    }

    /// Parse a page from JSON text.
    pub fn from_json(text: &str) -> Result<Self, PageError> {
        serde_json::from_str(text).map_err(PageError::Json)
    }

    /// Render the blocks, one node per block.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext) -> Vec<Node> {
        render_blocks(&self.blocks, ctx)
    }
}

/// Error loading a page.
#[derive(Debug)]
pub enum PageError {
    /// The text is not JSON, or not shaped like a page.
    Json(serde_json::Error),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid page: {err}"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

/// Render `page` as a complete HTML5 document.
#[must_use]
pub fn render_page(page: &Page, ctx: &RenderContext) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>");
    out.push_str(&escape_html(&page.title));
    out.push_str("</title>\n</head>\n<body>\n<main>\n");
    for node in page.render(ctx) {
        node.write_html(&mut out);
        out.push('\n');
    }
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

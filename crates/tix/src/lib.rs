#![forbid(unsafe_code)]

//! tix public facade crate.
//!
//! Re-exports the common types of the `tix-*` crates and offers a small
//! prelude:
//!
//! ```
//! use tix::prelude::*;
//!
//! let tickets = normalize_json(r#"[{"id": 1, "price_cents": 1234}]"#).unwrap();
//! assert_eq!(tickets[0].display_price(), "$12.34");
//!
//! let html = render_page_json(r#"{"title": "Shows", "blocks": [{"type": "poll"}]}"#, "").unwrap();
//! assert!(html.contains("Unknown block: poll"));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tix_core::{
    Clock, Currency, DebounceTimer, DeterministicClock, SortDirection, SortKey, SortSpec, Ticket,
    TicketQuery, WallClock, normalize, normalize_json,
};

// --- Widget re-exports -----------------------------------------------------

pub use tix_widgets::blocks::{BlockKind, render_block, render_blocks};
pub use tix_widgets::{
    Block, Element, MemoryLocation, NoLocation, Node, QueryLocation, RenderContext, Role,
    SearchConfig, SearchEvent, SearchInput, TicketList,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use tix_web::{BrowserLocation, Page, PageError, detect_location, render_page};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tix hosts.
#[derive(Debug)]
pub enum Error {
    /// Malformed JSON input.
    Json(serde_json::Error),
    /// A page description could not be loaded.
    #[cfg(feature = "web")]
    Page(PageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Page(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Page(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(feature = "web")]
impl From<PageError> for Error {
    fn from(err: PageError) -> Self {
        Self::Page(err)
    }
}

/// Standard result type for tix APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a page description and render it as an HTML document, filtering
/// ticket lists by `search`.
#[cfg(feature = "web")]
pub fn render_page_json(page_json: &str, search: &str) -> Result<String> {
    let page = Page::from_json(page_json)?;
    Ok(render_page(&page, &RenderContext::new().with_search(search)))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Block, Clock, Currency, Error, Node, QueryLocation, RenderContext, Result, SearchConfig,
        SearchEvent, SearchInput, Ticket, TicketQuery, normalize, normalize_json, render_blocks,
    };

    #[cfg(feature = "web")]
    pub use crate::{Page, render_page, render_page_json};

    pub use crate::{core, widgets};
}

pub use tix_core as core;
#[cfg(feature = "web")]
pub use tix_web as web;
pub use tix_widgets as widgets;

#![forbid(unsafe_code)]

//! Browser front-end for tix.
//!
//! - [`page`] loads page descriptions and renders complete HTML documents.
//! - [`BrowserLocation`] backs URL sync with `window.location` and
//!   `history.replaceState`.
//! - On `wasm32`, `renderPage`, `normalizeTickets`, and the `TixSearch`
//!   class are exported through `wasm-bindgen`.
//!
//! Native builds compile the browser pieces as stubs so the workspace checks
//! and tests on any target.

mod browser;
pub mod page;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use browser::{BrowserLocation, detect_location};
pub use page::{Page, PageError, render_page};

#[cfg(target_arch = "wasm32")]
pub use wasm::TixSearch;

#![forbid(unsafe_code)]

//! Test support and the command-line front end for tix.
//!
//! - [`snapshot`]: stored-output checks. Page snapshots are diffed per block
//!   key, so a failing test names the blocks that moved.
//! - [`fixtures`]: a demo page touching every block kind, one unknown tag,
//!   and messy ticket records.
//! - [`cli`]: the `tix-harness` binary, which renders pages and normalizes
//!   ticket files.
//!
//! ```ignore
//! use tix_harness::{SnapshotFormat, assert_snapshot, demo_page};
//!
//! #[test]
//! fn demo_page_renders() {
//!     let html = render_page(&demo_page(), &RenderContext::new());
//!     assert_snapshot!("demo_page", &html, SnapshotFormat::Page);
//! }
//! ```
//!
//! `BLESS=1 cargo test` records fresh output into `tests/snapshots/`.

pub mod cli;
pub mod fixtures;
pub mod snapshot;

pub use cli::{Command, HarnessError, Opts, run};
pub use fixtures::{DEMO_PAGE_JSON, demo_page};
pub use snapshot::{
    Change, SnapshotError, SnapshotFormat, bless_requested, check_snapshot, snapshot_dir,
};

/// Check output against `tests/snapshots/{name}.snap` of the calling crate,
/// panicking with the report on failure. The format defaults to
/// [`SnapshotFormat::Text`].
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $text:expr) => {
        $crate::assert_snapshot!($name, $text, $crate::SnapshotFormat::Text)
    };
    ($name:expr, $text:expr, $format:expr) => {
        if let Err(err) = $crate::check_snapshot(
            &$crate::snapshot_dir(env!("CARGO_MANIFEST_DIR")),
            $name,
            $text,
            $format,
            $crate::bless_requested(),
        ) {
            panic!("{err}");
        }
    };
}

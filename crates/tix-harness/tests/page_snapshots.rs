#![forbid(unsafe_code)]

//! Snapshot tests for rendered pages and CLI output.
//!
//! Update with `BLESS=1 cargo test -p tix-harness --test page_snapshots`.

use tix_harness::cli::{Command, Opts, run};
use tix_harness::{DEMO_PAGE_JSON, SnapshotFormat, assert_snapshot, demo_page};
use tix_web::page::render_page;
use tix_widgets::blocks::RenderContext;

fn write_fixture(name: &str, contents: &str) -> String {
    let dir = std::env::temp_dir().join("tix_harness_page_snapshots");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn demo_page_unfiltered() {
    let html = render_page(&demo_page(), &RenderContext::new());
    assert_snapshot!("demo_page", &html, SnapshotFormat::Page);
}

#[test]
fn demo_page_filtered_by_search() {
    let html = render_page(&demo_page(), &RenderContext::new().with_search("jazz"));
    assert_snapshot!("demo_page_search_jazz", &html, SnapshotFormat::Page);
}

#[test]
fn cli_render_matches_library_render() {
    let path = write_fixture("demo_page.json", DEMO_PAGE_JSON);
    let opts = Opts {
        command: Command::Render(path),
        search: "jazz".into(),
    };
    let out = run(&opts).unwrap();
    assert_eq!(
        out,
        render_page(&demo_page(), &RenderContext::new().with_search("jazz"))
    );
}

#[test]
fn cli_normalize_prints_tickets() {
    let path = write_fixture(
        "tickets.json",
        r#"[{"id":1,"title":null,"price_cents":1234,"currency":"USD"},{"id":null},{"id":"x","price_cents":"bad","currency":"JPY"}]"#,
    );
    let opts = Opts {
        command: Command::Normalize(path),
        search: String::new(),
    };
    assert_snapshot!("normalize_tickets", &run(&opts).unwrap());
}

#[test]
fn cli_render_rejects_non_page_json() {
    let path = write_fixture("not_a_page.json", "not json");
    let opts = Opts {
        command: Command::Render(path),
        search: String::new(),
    };
    let err = run(&opts).unwrap_err();
    assert!(err.to_string().starts_with("invalid page: "));
}

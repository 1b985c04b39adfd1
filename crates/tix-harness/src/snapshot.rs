#![forbid(unsafe_code)]

//! Stored-output checks for rendered pages and CLI text.
//!
//! A snapshot is the exact text a render produced, kept in
//! `tests/snapshots/{name}.snap`. [`check_snapshot`] compares fresh output
//! against it and reports what moved:
//!
//! - [`SnapshotFormat::Page`] reads both sides as tix page documents. Lines
//!   inside `<main>` are matched by their block `data-key`, so a failure
//!   names the blocks that changed, disappeared, or appeared. Lines outside
//!   `<main>` are compared by position.
//! - [`SnapshotFormat::Text`] compares line by line.
//!
//! Trailing whitespace and trailing blank lines never count as a change.
//! With `bless` set the fresh output overwrites the stored file instead.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How stored and fresh output are lined up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// An HTML page from `tix_web::page::render_page`.
    Page,
    /// Any other line-oriented text.
    Text,
}

impl SnapshotFormat {
    /// Differences between `expected` and `actual`, empty when they match.
    #[must_use]
    pub fn changes(self, expected: &str, actual: &str) -> Vec<Change> {
        match self {
            Self::Page => page_changes(expected, actual),
            Self::Text => line_changes(expected, actual),
        }
    }
}

/// One difference between stored and fresh output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A line outside any block, numbered from 1 in the stored file (or the
    /// fresh output when the stored file is shorter).
    Line {
        number: usize,
        expected: Option<String>,
        actual: Option<String>,
    },
    /// A rendered block, identified by its key.
    Block {
        key: String,
        expected: Option<String>,
        actual: Option<String>,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (expected, actual) = match self {
            Self::Line {
                number,
                expected,
                actual,
            } => {
                write!(f, "line {number}")?;
                (expected, actual)
            }
            Self::Block {
                key,
                expected,
                actual,
            } => {
                let what = match (expected, actual) {
                    (Some(_), Some(_)) => "changed",
                    (Some(_), None) => "missing",
                    _ => "added",
                };
                write!(f, "block {key} {what}")?;
                (expected, actual)
            }
        };
        if let Some(line) = expected {
            write!(f, "\n  - {line}")?;
        }
        if let Some(line) = actual {
            write!(f, "\n  + {line}")?;
        }
        Ok(())
    }
}

/// Why a snapshot check failed.
#[derive(Debug)]
pub enum SnapshotError {
    /// Nothing stored yet.
    Missing { path: PathBuf },
    /// Stored and fresh output differ.
    Mismatch { path: PathBuf, changes: Vec<Change> },
    /// The stored file could not be read or written.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(
                f,
                "no snapshot at {}; rerun with BLESS=1 to record one",
                path.display()
            ),
            Self::Mismatch { path, changes } => {
                write!(
                    f,
                    "{} is out of date ({} difference{}); rerun with BLESS=1 to accept",
                    path.display(),
                    changes.len(),
                    if changes.len() == 1 { "" } else { "s" }
                )?;
                for change in changes {
                    write!(f, "\n{change}")?;
                }
                Ok(())
            }
            Self::Io { path, source } => write!(f, "snapshot {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Missing { .. } | Self::Mismatch { .. } => None,
        }
    }
}

/// `tests/snapshots` under a crate's manifest directory.
#[must_use]
pub fn snapshot_dir(manifest_dir: &str) -> PathBuf {
    Path::new(manifest_dir).join("tests").join("snapshots")
}

/// Whether `BLESS=1` (or `BLESS=true`) asks tests to record new output.
#[must_use]
pub fn bless_requested() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Compare `actual` with `{dir}/{name}.snap`, or record it when `bless`.
pub fn check_snapshot(
    dir: &Path,
    name: &str,
    actual: &str,
    format: SnapshotFormat,
    bless: bool,
) -> Result<(), SnapshotError> {
    let path = dir.join(format!("{name}.snap"));

    if bless {
        let written = fs::create_dir_all(dir).and_then(|()| fs::write(&path, actual));
        return written.map_err(|source| SnapshotError::Io { path, source });
    }

    let expected = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(SnapshotError::Missing { path });
        }
        Err(source) => return Err(SnapshotError::Io { path, source }),
    };

    let changes = format.changes(&expected, actual);
    if changes.is_empty() {
        Ok(())
    } else {
        Err(SnapshotError::Mismatch { path, changes })
    }
}

/// Lines with trailing whitespace and trailing blank lines removed.
fn significant_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Positional comparison of numbered lines.
fn numbered_changes(expected: &[(usize, &str)], actual: &[(usize, &str)]) -> Vec<Change> {
    let len = expected.len().max(actual.len());
    (0..len)
        .filter_map(|i| {
            let e = expected.get(i);
            let a = actual.get(i);
            if e.map(|(_, line)| line) == a.map(|(_, line)| line) {
                return None;
            }
            let number = e.or(a).map_or(i + 1, |(n, _)| *n);
            Some(Change::Line {
                number,
                expected: e.map(|(_, line)| (*line).to_string()),
                actual: a.map(|(_, line)| (*line).to_string()),
            })
        })
        .collect()
}

fn numbered<'a>(lines: &[&'a str]) -> Vec<(usize, &'a str)> {
    lines.iter().enumerate().map(|(i, line)| (i + 1, *line)).collect()
}

/// Line-by-line differences.
#[must_use]
pub fn line_changes(expected: &str, actual: &str) -> Vec<Change> {
    let expected = significant_lines(expected);
    let actual = significant_lines(actual);
    numbered_changes(&numbered(&expected), &numbered(&actual))
}

/// A page split into block lines (inside `<main>`) and everything else.
struct PageLines<'a> {
    document: Vec<(usize, &'a str)>,
    blocks: Vec<(&'a str, &'a str)>,
}

impl<'a> PageLines<'a> {
    fn split(lines: &[&'a str]) -> Self {
        let mut document = Vec::new();
        let mut blocks = Vec::new();
        let mut in_main = false;
        for (i, &line) in lines.iter().enumerate() {
            match line {
                "<main>" => {
                    in_main = true;
                    document.push((i + 1, line));
                }
                "</main>" => {
                    in_main = false;
                    document.push((i + 1, line));
                }
                _ if in_main => blocks.push((block_key(line).unwrap_or(line), line)),
                _ => document.push((i + 1, line)),
            }
        }
        Self { document, blocks }
    }
}

/// The first `data-key` on a rendered block line.
fn block_key(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once("data-key=\"")?;
    rest.split_once('"').map(|(key, _)| key)
}

fn line_for(blocks: &[(&str, &str)], key: &str) -> Option<String> {
    blocks
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, line)| (*line).to_string())
}

/// Differences between two page documents, by block key.
#[must_use]
pub fn page_changes(expected: &str, actual: &str) -> Vec<Change> {
    let expected_lines = significant_lines(expected);
    let actual_lines = significant_lines(actual);
    let expected = PageLines::split(&expected_lines);
    let actual = PageLines::split(&actual_lines);

    let mut changes = numbered_changes(&expected.document, &actual.document);

    for (key, line) in &expected.blocks {
        match line_for(&actual.blocks, key) {
            Some(fresh) if fresh == *line => {}
            fresh => changes.push(Change::Block {
                key: (*key).to_string(),
                expected: Some((*line).to_string()),
                actual: fresh,
            }),
        }
    }
    for (key, line) in &actual.blocks {
        if line_for(&expected.blocks, key).is_none() {
            changes.push(Change::Block {
                key: (*key).to_string(),
                expected: None,
                actual: Some((*line).to_string()),
            });
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = concat!(
        "<title>Tonight</title>\n",
        "<main>\n",
        "<header data-key=\"hero-0\"><h1>Tonight</h1></header>\n",
        "<section data-key=\"text-1\"><p>Doors at 7</p></section>\n",
        "</main>\n",
    );

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("tix_harness_snapshot").join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn trailing_whitespace_is_not_a_change() {
        assert!(line_changes("a  \nb\n\n\n", "a\nb").is_empty());
        assert!(page_changes(PAGE, &PAGE.replace("</main>\n", "</main>   \n\n")).is_empty());
    }

    #[test]
    fn text_changes_are_numbered() {
        assert_eq!(
            line_changes("one\ntwo\nthree", "one\n2\nthree\nfour"),
            vec![
                Change::Line {
                    number: 2,
                    expected: Some("two".into()),
                    actual: Some("2".into()),
                },
                Change::Line {
                    number: 4,
                    expected: None,
                    actual: Some("four".into()),
                },
            ]
        );
    }

    #[test]
    fn page_changes_name_blocks() {
        let actual = PAGE
            .replace("Doors at 7", "Doors at 8")
            .replace("</main>", "<div data-key=\"poll-2\">Unknown block: poll</div>\n</main>");
        let changes = page_changes(PAGE, &actual);
        assert_eq!(
            changes,
            vec![
                Change::Block {
                    key: "text-1".into(),
                    expected: Some(r#"<section data-key="text-1"><p>Doors at 7</p></section>"#.into()),
                    actual: Some(r#"<section data-key="text-1"><p>Doors at 8</p></section>"#.into()),
                },
                Change::Block {
                    key: "poll-2".into(),
                    expected: None,
                    actual: Some(r#"<div data-key="poll-2">Unknown block: poll</div>"#.into()),
                },
            ]
        );
        assert_eq!(changes[1].to_string(), "block poll-2 added\n  + <div data-key=\"poll-2\">Unknown block: poll</div>");
    }

    #[test]
    fn missing_block_and_title_change() {
        let actual = PAGE
            .replace("<title>Tonight</title>", "<title>Today</title>")
            .replace("<header data-key=\"hero-0\"><h1>Tonight</h1></header>\n", "");
        let changes = page_changes(PAGE, &actual);
        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes[0].to_string(),
            "line 1\n  - <title>Tonight</title>\n  + <title>Today</title>"
        );
        assert!(changes[1].to_string().starts_with("block hero-0 missing\n  - <header"));
    }

    #[test]
    fn check_records_then_matches() {
        let dir = scratch_dir("record");
        check_snapshot(&dir, "page", PAGE, SnapshotFormat::Page, true).unwrap();
        check_snapshot(&dir, "page", PAGE, SnapshotFormat::Page, false).unwrap();
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn check_reports_mismatch() {
        let dir = scratch_dir("mismatch");
        check_snapshot(&dir, "out", "old\n", SnapshotFormat::Text, true).unwrap();
        let err = check_snapshot(&dir, "out", "new\n", SnapshotFormat::Text, false).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("out.snap is out of date (1 difference)"));
        assert!(message.ends_with("line 1\n  - old\n  + new"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn check_reports_missing() {
        let dir = scratch_dir("missing");
        let err = check_snapshot(&dir, "nothing", "x", SnapshotFormat::Text, false).unwrap_err();
        assert!(matches!(err, SnapshotError::Missing { .. }));
        assert!(err.to_string().contains("rerun with BLESS=1"));
    }

    #[test]
    fn snapshot_dir_is_under_tests() {
        assert_eq!(
            snapshot_dir("/work/tix-harness"),
            PathBuf::from("/work/tix-harness/tests/snapshots")
        );
    }
}

#![forbid(unsafe_code)]

//! Command-line interface of the `tix-harness` binary.
//!
//! Parses args manually to keep the binary lean. The search text used to
//! filter ticket lists can also come from `TIX_HARNESS_SEARCH`; an explicit
//! `--search=` flag wins over it.

use std::fmt;
use std::io::{self, Read};

use tix_core::normalize_json;
use tix_web::page::{Page, PageError, render_page};
use tix_widgets::blocks::RenderContext;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable seeding the search text.
pub const SEARCH_ENV: &str = "TIX_HARNESS_SEARCH";

const HELP_TEXT: &str = "\
tix-harness: render block pages and normalize ticket data

USAGE:
    tix-harness [OPTIONS] render <page.json>
    tix-harness [OPTIONS] normalize <tickets.json>

COMMANDS:
    render        Print the page as a complete HTML document
    normalize     Print the normalized tickets as JSON

    Use '-' as the file name to read from stdin.

OPTIONS:
    --search=TEXT    Filter ticket lists on the page by TEXT
    --help, -h       Show this help message
    --version, -V    Show version

ENVIRONMENT VARIABLES:
    TIX_HARNESS_SEARCH    Default for --search
    TIX_LOG               Log filter (e.g. 'debug', 'tix_widgets=trace')";

/// What to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Render(String),
    Normalize(String),
    Help,
    Version,
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub command: Command,
    /// Committed search text for ticket lists.
    pub search: String,
}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Self, HarnessError> {
        Self::parse_from(std::env::args().skip(1), std::env::var(SEARCH_ENV).ok())
    }

    /// Parse `args` (without the program name).
    pub fn parse_from<I>(args: I, search_env: Option<String>) -> Result<Self, HarnessError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut search = search_env.unwrap_or_default();
        let mut positional = Vec::new();

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Self::with_command(Command::Help, search)),
                "--version" | "-V" => return Ok(Self::with_command(Command::Version, search)),
                other => {
                    if let Some(val) = other.strip_prefix("--search=") {
                        search = val.to_string();
                    } else if other.starts_with("--") {
                        return Err(HarnessError::Usage(format!("unknown argument: {other}")));
                    } else {
                        positional.push(arg);
                    }
                }
            }
        }

        let mut positional = positional.into_iter();
        let command = match (positional.next().as_deref(), positional.next()) {
            (Some("render"), Some(path)) => Command::Render(path),
            (Some("normalize"), Some(path)) => Command::Normalize(path),
            (Some(cmd @ ("render" | "normalize")), None) => {
                return Err(HarnessError::Usage(format!("{cmd}: missing file argument")));
            }
            (Some(other), _) => {
                return Err(HarnessError::Usage(format!("unknown command: {other}")));
            }
            (None, _) => return Err(HarnessError::Usage("missing command".to_string())),
        };
        if let Some(extra) = positional.next() {
            return Err(HarnessError::Usage(format!("unexpected argument: {extra}")));
        }

        Ok(Self::with_command(command, search))
    }

    fn with_command(command: Command, search: String) -> Self {
        Self { command, search }
    }
}

/// Errors reported by the binary.
#[derive(Debug)]
pub enum HarnessError {
    /// Bad command line.
    Usage(String),
    /// Reading an input file failed.
    Io { path: String, source: io::Error },
    /// The page file is not a valid page.
    Page(PageError),
    /// The ticket file is not JSON, or output serialization failed.
    Json(serde_json::Error),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}"),
            Self::Io { path, source } => write!(f, "cannot read {path}: {source}"),
            Self::Page(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Usage(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Page(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<PageError> for HarnessError {
    fn from(err: PageError) -> Self {
        Self::Page(err)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl HarnessError {
    /// Whether the help hint should follow the message.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

/// Run a parsed command, returning what to print on stdout.
pub fn run(opts: &Opts) -> Result<String, HarnessError> {
    match &opts.command {
        Command::Help => Ok(format!("{HELP_TEXT}\n")),
        Command::Version => Ok(format!("tix-harness {VERSION}\n")),
        Command::Render(path) => {
            let text = read_input(path)?;
            let page = Page::from_json(&text)?;
            tix_core::info!(
                path = %path,
                blocks = page.blocks.len(),
                search = %opts.search,
                "rendering page"
            );
            let ctx = RenderContext::new().with_search(opts.search.as_str());
            Ok(render_page(&page, &ctx))
        }
        Command::Normalize(path) => {
            let text = read_input(path)?;
            let tickets = normalize_json(&text)?;
            tix_core::info!(path = %path, tickets = tickets.len(), "normalized tickets");
            let mut out = serde_json::to_string_pretty(&tickets)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Read a file, or stdin for `-`.
fn read_input(path: &str) -> Result<String, HarnessError> {
    let io_error = |source| HarnessError::Io {
        path: path.to_string(),
        source,
    };
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(io_error)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(io_error)
    }
}

#![forbid(unsafe_code)]

//! Client-side search and sort over normalized tickets.
//!
//! A [`TicketQuery`] is the listing's view state: the committed search text
//! plus an optional [`SortSpec`]. Applying it never mutates the tickets; it
//! returns borrowed references in display order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::ticket::Ticket;

/// Field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Case-insensitive title order.
    Title,
    /// Numeric price order (currency is ignored).
    Price,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A sort key with its direction, written as `price-asc`, `title-desc`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Parse a spec, returning `None` for anything unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn compare(self, a: &Ticket, b: &Ticket) -> Ordering {
        let ord = match self.key {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Price => a.price.total_cmp(&b.price),
        };
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Error returned when a sort spec string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortError(String);

impl fmt::Display for ParseSortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized sort spec: {:?}", self.0)
    }
}

impl std::error::Error for ParseSortError {}

impl FromStr for SortSpec {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (key, dir) = trimmed
            .split_once('-')
            .ok_or_else(|| ParseSortError(s.to_string()))?;
        let key = match key {
            "title" => SortKey::Title,
            "price" => SortKey::Price,
            _ => return Err(ParseSortError(s.to_string())),
        };
        let direction = match dir {
            "asc" => SortDirection::Ascending,
            "desc" => SortDirection::Descending,
            _ => return Err(ParseSortError(s.to_string())),
        };
        Ok(Self { key, direction })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            SortKey::Title => "title",
            SortKey::Price => "price",
        };
        let dir = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        write!(f, "{key}-{dir}")
    }
}

/// Search text and sort order for a ticket listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketQuery {
    text: String,
    sort: Option<SortSpec>,
}

impl TicketQuery {
    /// An empty query: everything matches, input order kept.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text (builder).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the sort order (builder).
    #[must_use]
    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    /// The raw search text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The sort order, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Whether the trimmed text is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether a ticket matches the search text.
    ///
    /// Case-insensitive substring match against title or id.
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        let needle = self.text.trim().to_lowercase();
        needle.is_empty()
            || ticket.title.to_lowercase().contains(&needle)
            || ticket.id.to_lowercase().contains(&needle)
    }

    /// Filter, then stable-sort.
    #[must_use]
    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        let mut hits: Vec<&Ticket> = tickets.iter().filter(|t| self.matches(t)).collect();
        if let Some(sort) = self.sort {
            hits.sort_by(|a, b| sort.compare(a, b));
        }
        crate::trace!(
            total = tickets.len(),
            hits = hits.len(),
            "applied ticket query"
        );
        hits
    }
}

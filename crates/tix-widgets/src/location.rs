#![forbid(unsafe_code)]

//! Address-bar query-string capability.
//!
//! The search input may mirror its committed value into one query parameter.
//! Access goes through [`QueryLocation`] so the widget never inspects its
//! environment itself:
//!
//! - [`NoLocation`] is used wherever there is no address bar; every read
//!   returns `None` and every write is dropped.
//! - [`MemoryLocation`] keeps a URL in memory. Native hosts and tests use it.
//! - `tix-web` provides a browser implementation backed by `window.location`
//!   and `history.replaceState`.

use std::cell::RefCell;
use std::rc::Rc;

use url::Url;

/// Read and replace query parameters of the hosting page's address.
pub trait QueryLocation {
    /// Current value of `name`, if present.
    fn query_param(&self, name: &str) -> Option<String>;

    /// Set `name` to `value`, or remove it when `value` is `None`.
    ///
    /// Implementations replace the current history entry; they never
    /// navigate or reload.
    fn replace_query_param(&mut self, name: &str, value: Option<&str>);

    /// Whether an address bar actually backs this capability.
    fn is_addressable(&self) -> bool {
        true
    }
}

/// Capability for hosts without an address bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl QueryLocation for NoLocation {
    fn query_param(&self, _name: &str) -> Option<String> {
        None
    }

    fn replace_query_param(&mut self, _name: &str, _value: Option<&str>) {}

    fn is_addressable(&self) -> bool {
        false
    }
}

/// In-memory address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    url: Url,
    replacements: usize,
}

impl MemoryLocation {
    /// Default address used by [`MemoryLocation::default`].
    pub const DEFAULT_URL: &'static str = "http://localhost/";

    /// Start at `url`.
    pub fn new(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(url)?,
            replacements: 0,
        })
    }

    /// Start at an existing URL.
    #[must_use]
    pub fn from_url(url: Url) -> Self {
        Self {
            url,
            replacements: 0,
        }
    }

    /// Full current address.
    #[must_use]
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Query string without the leading `?` (empty when absent).
    #[must_use]
    pub fn search(&self) -> &str {
        self.url.query().unwrap_or("")
    }

    /// Number of history-entry replacements performed.
    #[must_use]
    pub const fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        let url = Url::parse(Self::DEFAULT_URL).expect("DEFAULT_URL is a valid absolute URL");
        Self::from_url(url)
    }
}

impl QueryLocation for MemoryLocation {
    fn query_param(&self, name: &str) -> Option<String> {
        query_param(&self.url, name)
    }

    fn replace_query_param(&mut self, name: &str, value: Option<&str>) {
        set_query_param(&mut self.url, name, value);
        self.replacements += 1;
    }
}

impl<L: QueryLocation + ?Sized> QueryLocation for Box<L> {
    fn query_param(&self, name: &str) -> Option<String> {
        (**self).query_param(name)
    }

    fn replace_query_param(&mut self, name: &str, value: Option<&str>) {
        (**self).replace_query_param(name, value);
    }

    fn is_addressable(&self) -> bool {
        (**self).is_addressable()
    }
}

/// Shared capability, for hosts where several inputs watch one address.
impl<L: QueryLocation + ?Sized> QueryLocation for Rc<RefCell<L>> {
    fn query_param(&self, name: &str) -> Option<String> {
        self.borrow().query_param(name)
    }

    fn replace_query_param(&mut self, name: &str, value: Option<&str>) {
        self.borrow_mut().replace_query_param(name, value);
    }

    fn is_addressable(&self) -> bool {
        self.borrow().is_addressable()
    }
}

/// First value of `name` in the URL's query string.
#[must_use]
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Set or remove `name` in the URL's query string, keeping other pairs in
/// order. An empty query string is dropped entirely (`/path`, not `/path?`).
pub fn set_query_param(url: &mut Url, name: &str, value: Option<&str>) {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if let Some(value) = value {
        pairs.push((name.to_string(), value.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

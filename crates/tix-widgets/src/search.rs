#![forbid(unsafe_code)]

//! Debounced search input.
//!
//! [`SearchInput`] tracks two values:
//!
//! - `current`: what the user sees, updated synchronously on every edit.
//! - `committed`: the value consumers act on. It catches up with `current`
//!   only after `current` has stayed unchanged for the debounce delay.
//!
//! Each edit restarts the window, so a burst of keystrokes produces a single
//! commit. The host drives time: it passes `now` into every edit and calls
//! [`SearchInput::tick`] from its frame or timer loop. A commit that changes
//! the committed value runs the `on_change` callback once and, when URL sync
//! is enabled, mirrors the value into the address bar.
//!
//! # Usage
//!
//! ```
//! use core::time::Duration;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tix_widgets::search::{SearchConfig, SearchInput};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let mut input = SearchInput::new(SearchConfig::default().with_debounce_ms(100))
//!     .on_change(move |value| sink.borrow_mut().push(value.to_string()));
//! input.mount();
//!
//! input.set_text("ja", Duration::from_millis(0));
//! input.set_text("jazz", Duration::from_millis(40));
//! input.tick(Duration::from_millis(120)); // still inside the window
//! input.tick(Duration::from_millis(140));
//!
//! assert_eq!(*seen.borrow(), ["jazz"]);
//! ```

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};
use tix_core::{Clock, DebounceTimer};
use unicode_segmentation::UnicodeSegmentation;

use crate::location::{NoLocation, QueryLocation};
use crate::node::{Element, Role};

/// Text of the status region while a commit is pending.
pub const PENDING_STATUS: &str = "Searching…";

/// Accessible name of the clear button.
pub const CLEAR_LABEL: &str = "Clear search";

/// Search input configuration.
///
/// Deserializes from camelCase JSON, e.g.
/// `{"placeholder": "Find a show", "debounceMs": 150, "syncUrl": true}`.
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Text shown (and committed) before any edit.
    pub initial_value: String,
    pub placeholder: String,
    /// Debounce window in milliseconds. Zero commits synchronously.
    pub debounce_ms: u64,
    /// Mirror committed text into the address bar.
    #[serde(alias = "syncWithUrl")]
    pub sync_url: bool,
    /// Query parameter used when `sync_url` is on.
    pub url_param: String,
    /// Accessible label of the input.
    pub label: String,
    /// Element id of the input; the clear button uses `{id}-clear`.
    pub id: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_value: String::new(),
            placeholder: "Search tickets…".to_string(),
            debounce_ms: 300,
            sync_url: false,
            url_param: "q".to_string(),
            label: "Search".to_string(),
            id: "search".to_string(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_debounce(self, delay: Duration) -> Self {
        let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.with_debounce_ms(ms)
    }

    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    #[must_use]
    pub fn with_url_sync(mut self, enabled: bool) -> Self {
        self.sync_url = enabled;
        self
    }

    #[must_use]
    pub fn with_url_param(mut self, param: impl Into<String>) -> Self {
        self.url_param = param.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The debounce window.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Id of the clear button.
    #[must_use]
    pub fn clear_id(&self) -> String {
        format!("{}-clear", self.id)
    }
}

/// An edit or command delivered to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// Replace the whole text (native `input` events).
    Input(String),
    /// Append a character at the end.
    Char(char),
    /// Delete the last grapheme.
    Backspace,
    /// Clear the text.
    Escape,
    /// The clear button was activated.
    ClearClicked,
    /// Commit immediately (Enter).
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

type ChangeCallback = Box<dyn FnMut(&str)>;

/// Debounced, optionally URL-synced search input.
pub struct SearchInput {
    config: SearchConfig,
    current: String,
    committed: String,
    timer: DebounceTimer,
    on_change: Option<ChangeCallback>,
    location: Box<dyn QueryLocation>,
    lifecycle: Lifecycle,
}

impl fmt::Debug for SearchInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchInput")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("committed", &self.committed)
            .field("timer", &self.timer)
            .field("has_on_change", &self.on_change.is_some())
            .field("addressable", &self.location.is_addressable())
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}

impl SearchInput {
    /// Create an unmounted input showing the configured initial value.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let timer = DebounceTimer::new(config.debounce());
        Self {
            current: config.initial_value.clone(),
            committed: config.initial_value.clone(),
            config,
            timer,
            on_change: None,
            location: Box::new(NoLocation),
            lifecycle: Lifecycle::Created,
        }
    }

    /// Attach the change callback (builder).
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Attach the address-bar capability (builder).
    #[must_use]
    pub fn with_location(mut self, location: impl QueryLocation + 'static) -> Self {
        self.location = Box::new(location);
        self
    }

    // --- Lifecycle ---

    /// Attach to the page.
    ///
    /// With URL sync on, a present query parameter replaces both values.
    /// The callback never runs here.
    pub fn mount(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.timer.cancel();

        if self.config.sync_url
            && let Some(seed) = self.location.query_param(&self.config.url_param)
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                id = %self.config.id,
                param = %self.config.url_param,
                "search seeded from address"
            );
            self.current.clone_from(&seed);
            self.committed = seed;
        }
    }

    /// Detach. Any pending commit is dropped and later events are ignored.
    pub fn unmount(&mut self) {
        self.timer.cancel();
        self.lifecycle = Lifecycle::Unmounted;
    }

    /// Only a mounted input accepts edits and commits.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    // --- Editing ---

    /// Replace the visible text and restart the debounce window.
    ///
    /// Returns `true` if the text changed.
    pub fn set_text(&mut self, text: impl Into<String>, now: Duration) -> bool {
        if !self.is_mounted() {
            return false;
        }
        let text = text.into();
        if text == self.current {
            return false;
        }
        self.current = text;
        if self.timer.is_immediate() {
            self.timer.cancel();
            self.commit();
        } else {
            self.timer.schedule(now);
        }
        true
    }

    /// Append a character.
    pub fn type_char(&mut self, ch: char, now: Duration) -> bool {
        let mut text = self.current.clone();
        text.push(ch);
        self.set_text(text, now)
    }

    /// Delete the last grapheme cluster.
    pub fn backspace(&mut self, now: Duration) -> bool {
        let Some((start, _)) = self.current.grapheme_indices(true).next_back() else {
            return false;
        };
        let text = self.current[..start].to_string();
        self.set_text(text, now)
    }

    /// Empty the text; the empty value commits after the window.
    pub fn clear(&mut self, now: Duration) -> bool {
        self.set_text(String::new(), now)
    }

    /// Apply one event. Returns `true` if the visible or committed state changed.
    pub fn handle_event(&mut self, event: SearchEvent, now: Duration) -> bool {
        match event {
            SearchEvent::Input(text) => self.set_text(text, now),
            SearchEvent::Char(ch) => self.type_char(ch, now),
            SearchEvent::Backspace => self.backspace(now),
            SearchEvent::Escape | SearchEvent::ClearClicked => self.clear(now),
            SearchEvent::Submit => self.commit_now(),
        }
    }

    // --- Time ---

    /// Advance to `now`, committing if the window has expired.
    ///
    /// Returns `true` if the committed value changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.is_mounted() && self.timer.poll(now) && self.commit()
    }

    /// [`tick`](Self::tick) at the clock's current time.
    pub fn tick_with(&mut self, clock: &impl Clock) -> bool {
        self.tick(clock.now())
    }

    /// Commit the visible text immediately, cancelling the window.
    pub fn commit_now(&mut self) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.timer.cancel();
        self.commit()
    }

    fn commit(&mut self) -> bool {
        if self.committed == self.current {
            return false;
        }
        self.committed.clone_from(&self.current);
        #[cfg(feature = "tracing")]
        tracing::debug!(id = %self.config.id, value = %self.committed, "search committed");

        if self.config.sync_url {
            let value = (!self.committed.is_empty()).then_some(self.committed.as_str());
            self.location.replace_query_param(&self.config.url_param, value);
        }
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.committed);
        }
        true
    }

    // --- State ---

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Visible text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.current
    }

    /// Debounced text.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Whether the visible text has not been committed yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.current != self.committed
    }

    /// When the pending window expires, if one is running.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    /// Whether the clear button is offered.
    #[must_use]
    pub fn shows_clear(&self) -> bool {
        !self.current.is_empty()
    }

    #[must_use]
    pub fn location(&self) -> &dyn QueryLocation {
        self.location.as_ref()
    }

    // --- View ---

    /// Render the current state.
    #[must_use]
    pub fn view(&self) -> Element {
        let config = &self.config;
        let clear_id = config.clear_id();
        let shows_clear = self.shows_clear();

        let input = Element::new("input")
            .attr("type", "search")
            .id(config.id.as_str())
            .attr("name", config.url_param.as_str())
            .attr("value", self.current.as_str())
            .attr("placeholder", config.placeholder.as_str())
            .attr("aria-label", config.label.as_str())
            .attr("autocomplete", "off")
            .attr_opt("aria-describedby", shows_clear.then_some(clear_id.as_str()));

        let clear = shows_clear.then(|| {
            Element::new("button")
                .attr("type", "button")
                .id(clear_id.as_str())
                .attr("aria-label", CLEAR_LABEL)
                .text("×")
        });

        let status = self.is_pending().then(|| {
            Element::new("span")
                .role(Role::Status)
                .attr("aria-live", "polite")
                .text(PENDING_STATUS)
        });

        Element::new("div")
            .role(Role::Search)
            .class("search-input")
            .child(
                Element::new("label")
                    .attr("for", config.id.as_str())
                    .text(config.label.as_str()),
            )
            .child(input)
            .child_opt(clear)
            .child_opt(status)
    }
}

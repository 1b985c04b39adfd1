#![forbid(unsafe_code)]

//! Core: ticket normalization, listing queries, debounce timing, and clocks.

pub mod clock;
pub mod debounce;
pub mod listing;
pub mod logging;
pub mod ticket;

pub use clock::{Clock, DeterministicClock, WallClock};
pub use debounce::DebounceTimer;
pub use listing::{SortDirection, SortKey, SortSpec, TicketQuery};
pub use ticket::{Currency, Ticket, normalize, normalize_json};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

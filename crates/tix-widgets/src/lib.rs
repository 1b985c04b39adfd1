#![forbid(unsafe_code)]

//! Widgets and page blocks for tix.
//!
//! Everything here renders into the owned [`Node`] tree from [`node`]. Hosts
//! serialize it to HTML or walk it in tests.

pub mod blocks;
pub mod location;
pub mod node;
pub mod search;
pub mod ticket_list;

pub use blocks::{Block, BlockKind, RenderContext, render_block, render_blocks};
pub use location::{MemoryLocation, NoLocation, QueryLocation};
pub use node::{Element, Node, Role};
pub use search::{SearchConfig, SearchEvent, SearchInput};
pub use ticket_list::TicketList;

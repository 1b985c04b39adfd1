#![forbid(unsafe_code)]

//! Block registry and renderer.
//!
//! A page is described as an ordered list of [`Block`]s: a `type` tag plus a
//! `props` record whose shape depends on the tag. The set of tags is closed
//! ([`BlockKind`]); each kind has exactly one typed renderer in
//! [`BLOCK_REGISTRY`], which is fixed at compile time.
//!
//! Rendering never fails. Every input block yields exactly one output node,
//! in input order, keyed `"{type}-{index}"`:
//!
//! - a registered tag with valid props renders normally,
//! - an unregistered tag renders a `note` placeholder reading
//!   `Unknown block: {type}`,
//! - a registered tag whose props do not fit its schema renders a `note`
//!   placeholder reading `Invalid block: {type}`.

pub mod hero;
pub mod rich_text;
pub mod search_box;
pub mod ticket_list;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::{Element, Node, Role};

/// The closed set of block tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Hero,
    Text,
    TicketList,
    Search,
}

impl BlockKind {
    pub const ALL: &'static [BlockKind] = &[
        BlockKind::Hero,
        BlockKind::Text,
        BlockKind::TicketList,
        BlockKind::Search,
    ];

    /// Wire tag, as it appears in the `type` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::Text => "text",
            BlockKind::TicketList => "ticketList",
            BlockKind::Search => "search",
        }
    }

    /// Parse a wire tag. Matching is exact.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a tag is not in the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlockKind(pub String);

impl fmt::Display for UnknownBlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownBlockKind {}

impl FromStr for BlockKind {
    type Err = UnknownBlockKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownBlockKind(s.to_string()))
    }
}

/// One block of a page description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Tag selecting the renderer. Kept as text so unknown tags survive
    /// deserialization and can be reported.
    #[serde(rename = "type")]
    pub tag: String,
    /// Tag-specific record. Missing props read as an empty record.
    #[serde(default)]
    pub props: Value,
}

impl Block {
    #[must_use]
    pub fn new(tag: impl Into<String>, props: Value) -> Self {
        Self {
            tag: tag.into(),
            props,
        }
    }

    /// The registered kind, if the tag is known.
    #[must_use]
    pub fn kind(&self) -> Option<BlockKind> {
        BlockKind::from_tag(&self.tag)
    }

    /// Stable key for the block at `index`.
    #[must_use]
    pub fn key(&self, index: usize) -> String {
        format!("{}-{index}", self.tag)
    }
}

/// Page-wide state visible to every renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    search: String,
}

impl RenderContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the committed search text (builder).
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Committed search text used to filter ticket lists.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }
}

/// A block with a typed props schema.
pub trait BlockView {
    const KIND: BlockKind;

    /// Props schema. Unknown fields must be ignored.
    type Props: DeserializeOwned;

    fn render(props: Self::Props, ctx: &RenderContext) -> Element;
}

/// Deserialize props, then render.
pub type RenderFn = fn(&Value, &RenderContext) -> Result<Element, serde_json::Error>;

fn render_typed<B: BlockView>(
    props: &Value,
    ctx: &RenderContext,
) -> Result<Element, serde_json::Error> {
    let props = match props {
        Value::Null => {
            <B::Props as Deserialize>::deserialize(&Value::Object(serde_json::Map::new()))?
        }
        props => <B::Props as Deserialize>::deserialize(props)?,
    };
    Ok(B::render(props, ctx))
}

/// Registry entry: a kind and its renderer.
#[derive(Clone, Copy)]
pub struct BlockEntry {
    pub kind: BlockKind,
    pub render: RenderFn,
}

impl BlockEntry {
    const fn of<B: BlockView>() -> Self {
        Self {
            kind: B::KIND,
            render: render_typed::<B>,
        }
    }
}

impl fmt::Debug for BlockEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockEntry").field("kind", &self.kind).finish()
    }
}

/// Block registry: single source of truth for tag dispatch.
pub const BLOCK_REGISTRY: &[BlockEntry] = &[
    BlockEntry::of::<hero::Hero>(),
    BlockEntry::of::<rich_text::RichText>(),
    BlockEntry::of::<ticket_list::TicketListBlock>(),
    BlockEntry::of::<search_box::SearchBox>(),
];

/// Renderer for `tag`, if registered.
#[must_use]
pub fn lookup(tag: &str) -> Option<&'static BlockEntry> {
    BLOCK_REGISTRY.iter().find(|entry| entry.kind.as_str() == tag)
}

/// Placeholder for a block that could not be rendered.
#[must_use]
pub fn placeholder(key: String, message: String) -> Element {
    Element::new("div")
        .key(key)
        .role(Role::Note)
        .class("block-placeholder")
        .text(message)
}

/// Render one block at position `index`.
#[must_use]
pub fn render_block(index: usize, block: &Block, ctx: &RenderContext) -> Node {
    let key = block.key(index);
    let Some(entry) = lookup(&block.tag) else {
        #[cfg(feature = "tracing")]
        tracing::warn!(index, tag = %block.tag, "unknown block type");
        return placeholder(key, format!("Unknown block: {}", block.tag)).into();
    };

    match (entry.render)(&block.props, ctx) {
        Ok(element) => element.key(key).into(),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(index, tag = %block.tag, error = %_err, "invalid block props");
            placeholder(key, format!("Invalid block: {}", block.tag)).into()
        }
    }
}

/// Render every block, in order. The output has one node per input block.
#[must_use]
pub fn render_blocks(blocks: &[Block], ctx: &RenderContext) -> Vec<Node> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("render_blocks", count = blocks.len()).entered();

    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            #[cfg(feature = "tracing")]
            tracing::trace!(index, tag = %block.tag, "render block");
            render_block(index, block, ctx)
        })
        .collect()
}

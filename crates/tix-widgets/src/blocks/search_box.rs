#![forbid(unsafe_code)]

//! `search` block: the search input, configured by the block props.
//!
//! A static render shows the page's committed search text when there is one.

use super::{BlockKind, BlockView, RenderContext};
use crate::node::Element;
use crate::search::{SearchConfig, SearchInput};

#[derive(Debug, Clone, Copy)]
pub struct SearchBox;

impl BlockView for SearchBox {
    const KIND: BlockKind = BlockKind::Search;
    type Props = SearchConfig;

    fn render(mut config: SearchConfig, ctx: &RenderContext) -> Element {
        if !ctx.search().is_empty() {
            config.initial_value = ctx.search().to_string();
        }
        SearchInput::new(config).view()
    }
}

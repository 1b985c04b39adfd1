#![forbid(unsafe_code)]

//! `ticketList` block: raw ticket records normalized at render time, then
//! filtered by the page's committed search text.

use serde::Deserialize;
use serde_json::Value;
use tix_core::{SortSpec, TicketQuery, normalize};

use super::{BlockKind, BlockView, RenderContext};
use crate::node::Element;
use crate::ticket_list::TicketList;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TicketListProps {
    #[serde(default)]
    pub heading: Option<String>,
    /// Raw records; anything that is not an array lists nothing.
    #[serde(default)]
    pub tickets: Value,
    /// `price-asc`, `title-desc`, ... Unrecognized values keep input order.
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct TicketListBlock;

impl BlockView for TicketListBlock {
    const KIND: BlockKind = BlockKind::TicketList;
    type Props = TicketListProps;

    fn render(props: TicketListProps, ctx: &RenderContext) -> Element {
        let tickets = normalize(&props.tickets);
        let query = TicketQuery::new()
            .with_text(ctx.search())
            .with_sort(props.sort.as_deref().and_then(SortSpec::parse));
        TicketList::new(&tickets)
            .query(query)
            .heading(props.heading)
            .view()
    }
}

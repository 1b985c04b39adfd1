#![forbid(unsafe_code)]

//! Ticket listing view.
//!
//! Renders the result of a [`TicketQuery`] over normalized tickets: a count
//! in a live status region, then either a keyed list or an empty-result
//! message.

use tix_core::{Ticket, TicketQuery};

use crate::node::{Element, Role};

/// `"1 ticket"`, `"3 tickets"`.
#[must_use]
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 ticket".to_string()
    } else {
        format!("{count} tickets")
    }
}

/// Message shown when nothing matches.
#[must_use]
pub fn empty_label(query: &TicketQuery) -> String {
    if query.is_blank() {
        "No tickets".to_string()
    } else {
        format!("No tickets match \"{}\"", query.text().trim())
    }
}

/// A filtered, sorted ticket list.
#[derive(Debug, Clone)]
pub struct TicketList<'a> {
    tickets: &'a [Ticket],
    query: TicketQuery,
    heading: Option<String>,
}

impl<'a> TicketList<'a> {
    /// List every ticket in input order.
    #[must_use]
    pub fn new(tickets: &'a [Ticket]) -> Self {
        Self {
            tickets,
            query: TicketQuery::new(),
            heading: None,
        }
    }

    /// Set the query (builder).
    #[must_use]
    pub fn query(mut self, query: TicketQuery) -> Self {
        self.query = query;
        self
    }

    /// Set the heading (builder).
    #[must_use]
    pub fn heading(mut self, heading: Option<String>) -> Self {
        self.heading = heading;
        self
    }

    /// Tickets in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&'a Ticket> {
        self.query.apply(self.tickets)
    }

    #[must_use]
    pub fn view(&self) -> Element {
        let visible = self.visible();

        let status = Element::new("p")
            .role(Role::Status)
            .class("ticket-count")
            .text(count_label(visible.len()));

        let body = if visible.is_empty() {
            Element::new("p")
                .class("ticket-empty")
                .text(empty_label(&self.query))
        } else {
            Element::new("ul")
                .role(Role::List)
                .class("tickets")
                .children(visible.iter().copied().map(ticket_item))
        };

        Element::new("section")
            .class("ticket-list")
            .child_opt(
                self.heading
                    .as_deref()
                    .map(|heading| Element::new("h2").text(heading)),
            )
            .child(status)
            .child(body)
    }
}

fn ticket_item(ticket: &Ticket) -> Element {
    Element::new("li")
        .key(ticket.id.as_str())
        .role(Role::ListItem)
        .child(Element::new("span").class("ticket-title").text(ticket.title.as_str()))
        .child(
            Element::new("span")
                .class("ticket-price")
                .attr("data-currency", ticket.currency.code())
                .text(ticket.display_price()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use pretty_assertions::assert_eq;
    use tix_core::{Currency, SortSpec};

    fn t(id: &str, title: &str, price: f64, currency: Currency) -> Ticket {
        Ticket {
            id: id.into(),
            title: title.into(),
            price,
            currency,
        }
    }

    fn sample() -> Vec<Ticket> {
        vec![
            t("a1", "Jazz Night", 40.0, Currency::Usd),
            t("b2", "Opera Gala", 120.5, Currency::Eur),
            t("c3", "Jazz Brunch", 18.0, Currency::Gbp),
        ]
    }

    fn keys(view: &Element) -> Vec<String> {
        let node = Node::from(view.clone());
        node.find_all(&|el| el.tag() == "li")
            .iter()
            .filter_map(|el| el.key_str().map(str::to_string))
            .collect()
    }

    #[test]
    fn count_labels() {
        assert_eq!(count_label(0), "0 tickets");
        assert_eq!(count_label(1), "1 ticket");
        assert_eq!(count_label(3), "3 tickets");
    }

    #[test]
    fn lists_all_in_order_by_default() {
        let tickets = sample();
        let view = TicketList::new(&tickets).view();
        assert_eq!(keys(&view), ["a1", "b2", "c3"]);
        let node = Node::from(view);
        assert_eq!(
            node.find_by_role(Role::Status).map(|el| el.child_nodes().to_vec()),
            Some(vec![Node::text("3 tickets")])
        );
    }

    #[test]
    fn query_filters_and_sorts() {
        let tickets = sample();
        let query = TicketQuery::new()
            .with_text("jazz")
            .with_sort(SortSpec::parse("price-asc"));
        let view = TicketList::new(&tickets).query(query).view();
        assert_eq!(keys(&view), ["c3", "a1"]);
    }

    #[test]
    fn item_shows_title_and_price() {
        let tickets = sample();
        let html = Node::from(ticket_item(&tickets[1])).to_html();
        assert_eq!(
            html,
            concat!(
                r#"<li data-key="b2" role="listitem">"#,
                r#"<span class="ticket-title">Opera Gala</span>"#,
                r#"<span class="ticket-price" data-currency="EUR">€120.50</span>"#,
                "</li>"
            )
        );
    }

    #[test]
    fn empty_result_names_the_query() {
        let tickets = sample();
        let view = TicketList::new(&tickets)
            .query(TicketQuery::new().with_text(" ballet "))
            .view();
        let node = Node::from(view);
        assert!(node.find_by_role(Role::List).is_none());
        assert!(node.text_content().contains("No tickets match \"ballet\""));
    }

    #[test]
    fn empty_input_says_no_tickets() {
        let view = TicketList::new(&[])
            .heading(Some("Tonight".into()))
            .view();
        assert_eq!(
            Node::from(view).to_html(),
            concat!(
                r#"<section class="ticket-list"><h2>Tonight</h2>"#,
                r#"<p role="status" class="ticket-count">0 tickets</p>"#,
                r#"<p class="ticket-empty">No tickets</p></section>"#
            )
        );
    }
}

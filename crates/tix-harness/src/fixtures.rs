#![forbid(unsafe_code)]

//! Demo fixtures.

use tix_web::page::Page;

/// A page using every block kind, messy ticket records, and one
/// unregistered block.
pub const DEMO_PAGE_JSON: &str = r#"{
  "title": "Tonight in Town",
  "blocks": [
    {"type": "hero", "props": {"title": "Tonight in Town", "subtitle": "Live shows near you"}},
    {"type": "search", "props": {"debounceMs": 250, "syncUrl": true}},
    {"type": "ticketList", "props": {
      "heading": "Tickets",
      "sort": "price-asc",
      "tickets": [
        {"id": 101, "title": "Jazz Night", "price_cents": 4000, "currency": "USD"},
        {"id": null, "title": "Ghost Show", "price_cents": 100},
        {"id": "b-7", "title": "  ", "price_cents": "free", "currency": "JPY"},
        {"id": 102, "title": "Opera Gala", "price_cents": 12050, "currency": "EUR"},
        {"id": 103, "title": "Jazz Brunch", "price_cents": 1800, "currency": "GBP"}
      ]
    }},
    {"type": "text", "props": {"heading": "About", "body": "Prices include fees.\n\nDoors open 30 minutes early."}},
    {"type": "carousel", "props": {"slides": 3}}
  ]
}"#;

/// [`DEMO_PAGE_JSON`], parsed.
///
/// # Panics
///
/// Never; the fixture is covered by tests.
#[must_use]
pub fn demo_page() -> Page {
    Page::from_json(DEMO_PAGE_JSON).expect("demo page fixture is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_page_parses() {
        let page = demo_page();
        assert_eq!(page.title, "Tonight in Town");
        let tags: Vec<&str> = page.blocks.iter().map(|b| b.tag.as_str()).collect();
        assert_eq!(tags, ["hero", "search", "ticketList", "text", "carousel"]);
    }
}

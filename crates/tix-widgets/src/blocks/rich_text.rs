#![forbid(unsafe_code)]

//! `text` block: an optional heading and a body split into paragraphs on
//! blank lines.

use serde::Deserialize;

use super::{BlockKind, BlockView, RenderContext};
use crate::node::Element;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextProps {
    pub body: String,
    #[serde(default)]
    pub heading: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct RichText;

impl BlockView for RichText {
    const KIND: BlockKind = BlockKind::Text;
    type Props = TextProps;

    fn render(props: TextProps, _ctx: &RenderContext) -> Element {
        Element::new("section")
            .class("text-block")
            .child_opt(props.heading.map(|heading| Element::new("h2").text(heading)))
            .children(paragraphs(&props.body).map(|p| Element::new("p").text(p)))
    }
}

/// Non-empty paragraphs of `body`, trimmed.
fn paragraphs(body: &str) -> impl Iterator<Item = &str> {
    body.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn splits_paragraphs_on_blank_lines() {
        let got: Vec<&str> = paragraphs("First line\n\n\n\n  Second\nstill second  \n\n").collect();
        assert_eq!(got, ["First line", "Second\nstill second"]);
    }

    #[test]
    fn renders_heading_then_paragraphs() {
        let props = TextProps {
            body: "One\n\nTwo".into(),
            heading: Some("About".into()),
        };
        let html = Node::from(RichText::render(props, &RenderContext::new())).to_html();
        assert_eq!(
            html,
            r#"<section class="text-block"><h2>About</h2><p>One</p><p>Two</p></section>"#
        );
    }

    #[test]
    fn body_is_required() {
        assert!(serde_json::from_str::<TextProps>(r#"{"heading":"x"}"#).is_err());
    }
}

#![forbid(unsafe_code)]

//! `hero` block: page banner with a title and optional subtitle.

use serde::Deserialize;

use super::{BlockKind, BlockView, RenderContext};
use crate::node::{Element, Role};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeroProps {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Hero;

impl BlockView for Hero {
    const KIND: BlockKind = BlockKind::Hero;
    type Props = HeroProps;

    fn render(props: HeroProps, _ctx: &RenderContext) -> Element {
        Element::new("header")
            .role(Role::Banner)
            .class("hero")
            .child(Element::new("h1").text(props.title))
            .child_opt(
                props
                    .subtitle
                    .map(|subtitle| Element::new("p").class("hero-subtitle").text(subtitle)),
            )
    }
}

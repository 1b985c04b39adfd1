//! Property-based invariant tests for block rendering and the search input.
//!
//! Verifies:
//! 1. One output node per input block, keyed `"{type}-{index}"` in order
//! 2. Unregistered tags become `note` placeholders naming the tag
//! 3. Placeholders never disturb their neighbors
//! 4. Any edit burst commits at most once, with the final text, no earlier
//!    than the window after the last edit

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use serde_json::{Value, json};
use tix_core::{Clock, DeterministicClock};
use tix_widgets::blocks::{Block, BlockKind, RenderContext, render_blocks};
use tix_widgets::node::Role;
use tix_widgets::search::{SearchConfig, SearchInput};

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_known_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        "[A-Za-z ]{1,12}".prop_map(|title| Block::new("hero", json!({ "title": title }))),
        "[a-z\n ]{0,24}".prop_map(|body| Block::new("text", json!({ "body": body }))),
        Just(Block::new("ticketList", json!({ "tickets": [{"id": 1}] }))),
        Just(Block::new("search", Value::Null)),
    ]
}

fn arb_unknown_tag() -> impl Strategy<Value = String> {
    "[a-z]{1,10}".prop_filter("registered tag", |tag| BlockKind::from_tag(tag).is_none())
}

fn arb_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        3 => arb_known_block(),
        1 => arb_unknown_tag().prop_map(|tag| Block::new(tag, json!({}))),
    ]
}

proptest! {
    #[test]
    fn output_matches_input_length_and_order(blocks in prop::collection::vec(arb_block(), 0..16)) {
        let nodes = render_blocks(&blocks, &RenderContext::new());
        prop_assert_eq!(nodes.len(), blocks.len());
        for (index, (node, block)) in nodes.iter().zip(&blocks).enumerate() {
            let expected = format!("{}-{index}", block.tag);
            prop_assert_eq!(node.key(), Some(expected.as_str()));
        }
    }

    #[test]
    fn unknown_tags_become_notes(blocks in prop::collection::vec(arb_block(), 0..16)) {
        let nodes = render_blocks(&blocks, &RenderContext::new());
        for (node, block) in nodes.iter().zip(&blocks) {
            let is_note = node.as_element().and_then(|el| el.get_attr("role")) == Some(Role::Note.as_str());
            if block.kind().is_some() {
                prop_assert!(!is_note, "known block {} rendered as placeholder", block.tag);
            } else {
                prop_assert!(is_note);
                prop_assert_eq!(node.text_content(), format!("Unknown block: {}", block.tag));
            }
        }
    }

    #[test]
    fn neighbors_render_the_same_with_or_without_unknowns(
        blocks in prop::collection::vec(arb_known_block(), 1..8),
        tag in arb_unknown_tag(),
        at in 0usize..8,
    ) {
        let ctx = RenderContext::new();
        let at = at.min(blocks.len());
        let mut with_unknown = blocks.clone();
        with_unknown.insert(at, Block::new(tag, Value::Null));

        let plain = render_blocks(&blocks, &ctx);
        let mixed = render_blocks(&with_unknown, &ctx);
        prop_assert_eq!(mixed.len(), plain.len() + 1);

        // Keys shift with position, so compare content only.
        let strip = |html: String| html.split_once('>').map(|(_, rest)| rest.to_string());
        for (i, node) in plain.iter().enumerate() {
            let j = if i < at { i } else { i + 1 };
            prop_assert_eq!(strip(node.to_html()), strip(mixed[j].to_html()));
        }
    }

    #[test]
    fn edit_burst_commits_final_text_once(
        edits in prop::collection::vec(("[a-z]{0,4}", 0u64..400), 1..12),
        delay in 1u64..200,
    ) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut input = SearchInput::new(SearchConfig::default().with_debounce_ms(delay))
            .on_change(move |value: &str| sink.borrow_mut().push(value.to_string()));
        input.mount();

        let mut clock = DeterministicClock::new();
        let mut final_text = String::new();
        for (i, (text, gap)) in edits.iter().enumerate() {
            clock.advance_ms(gap % delay);
            prop_assert!(!input.tick_with(&clock));
            // The index suffix makes every edit a change.
            final_text = format!("{text}{i}");
            prop_assert!(input.set_text(final_text.clone(), clock.now()));
        }

        clock.advance_ms(delay - 1);
        prop_assert!(!input.tick_with(&clock));
        prop_assert!(calls.borrow().is_empty());
        clock.advance_ms(1);
        prop_assert!(input.tick_with(&clock));
        prop_assert!(!input.is_pending());
        let calls = calls.borrow();
        prop_assert_eq!(calls.as_slice(), [final_text]);
    }
}

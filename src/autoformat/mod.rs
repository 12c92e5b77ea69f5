//! Autoformat engine
//!
//! Recognizes trigger sequences typed at the start of a block and rewrites
//! the block into styled content:
//! - `#` then space: heading
//! - `*` then space: bold
//! - `**` then space: accent colour
//! - `***` then space: underline

pub mod planner;
pub mod rewriter;
pub mod trigger;

pub use planner::{plan, EditPlan, TRIGGER_CHAR};
pub use rewriter::apply;
pub use trigger::{match_trigger, FormatAction, TriggerRule, TriggerScope, TRIGGERS};

use crate::editor::EditorState;
use crate::error::{EditorError, EditorResult};

/// Run the planner and, when a trigger fires, the rewriter
///
/// Returns `Ok(None)` when the inserted text should go through default
/// insertion. The planner runs exactly once; the rewritten block never
/// contains the space that fired it, so it cannot re-trigger.
pub fn handle_before_input(state: &EditorState, chars: &str) -> EditorResult<Option<EditorState>> {
    let selection = state.selection();
    let key = selection.start(state.content()).key;
    let block_text = state
        .content()
        .block_text(key)
        .ok_or_else(|| EditorError::UnknownBlock {
            key: key.to_string(),
        })?;

    match plan(selection, &block_text, chars) {
        Some(edit) => apply(&edit, state).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockType, ContentState, InlineStyle, SelectionState};

    fn at_end(text: &str) -> EditorState {
        let content = ContentState::from_plain_text(text);
        let key = content.first_block().key();
        EditorState::create_with_content(content)
            .force_selection(SelectionState::collapsed(key, text.chars().count()))
    }

    #[test]
    fn test_heading_property_cases() {
        for (text, expected) in [("#", ""), ("## ", ""), ("### Title", "Title")] {
            let next = handle_before_input(&at_end(text), " ").unwrap().unwrap();
            let block = next.content().first_block();
            assert_eq!(block.block_type(), BlockType::HeaderOne);
            assert_eq!(block.text(), expected);
        }
    }

    #[test]
    fn test_inline_property_cases() {
        for (text, style, expected) in [
            ("***under", InlineStyle::Underline, "under"),
            ("**red", InlineStyle::Red, "red"),
            ("*bold", InlineStyle::Bold, "bold"),
        ] {
            let next = handle_before_input(&at_end(text), " ").unwrap().unwrap();
            let block = next.content().first_block();
            assert_eq!(block.block_type(), BlockType::Unstyled);
            assert_eq!(block.text(), expected);
            assert!(block.has_style(0..expected.len(), style));
            for other in InlineStyle::ALL.into_iter().filter(|s| *s != style) {
                assert!(!block.style_at(0).contains(other));
            }
        }
    }

    #[test]
    fn test_non_trigger_leaves_default_path() {
        assert!(handle_before_input(&at_end("hello"), " ").unwrap().is_none());
        assert!(handle_before_input(&at_end("*bold"), "x").unwrap().is_none());

        let content = ContentState::from_plain_text("*bold");
        let key = content.first_block().key();
        let range = EditorState::create_with_content(content)
            .force_selection(SelectionState::in_block(key, 0, 5));
        assert!(handle_before_input(&range, " ").unwrap().is_none());
    }

    #[test]
    fn test_trigger_fires_in_second_block() {
        let content = ContentState::from_plain_text("intro\n#Heading");
        let key = content.blocks()[1].key();
        let state = EditorState::create_with_content(content)
            .force_selection(SelectionState::collapsed(key, 8));

        let next = handle_before_input(&state, " ").unwrap().unwrap();
        assert_eq!(next.content().plain_text(), "intro\nHeading");
        assert_eq!(next.content().blocks()[0].block_type(), BlockType::Unstyled);
        assert_eq!(next.content().blocks()[1].block_type(), BlockType::HeaderOne);
    }
}

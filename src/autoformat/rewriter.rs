//! Atomic rewriter
//!
//! Executes an `EditPlan` against the editor state: replace the start of the
//! block, then set the block type or toggle the inline style over the new
//! text. Both steps land in a single pushed change, so one undo reverts the
//! text and the formatting together.

use super::planner::EditPlan;
use super::trigger::FormatAction;
use crate::document::{SelectionState, StyleSet};
use crate::editor::{ChangeType, EditorState};
use crate::error::EditorResult;

/// Apply `plan` to the block holding the caret
///
/// Fails without producing a new state when the plan's span no longer fits
/// the block; the caller must treat that as fatal for the current edit.
/// Text already in the span loses its inline styles.
pub fn apply(plan: &EditPlan, state: &EditorState) -> EditorResult<EditorState> {
    let key = state.selection().start(state.content()).key;
    let replaced = state.content().replace_text(
        key,
        0..plan.trigger_length,
        &plan.rewritten_text,
        StyleSet::empty(),
    )?;

    let rewritten_len = plan.rewritten_text.chars().count();
    let (content, change) = match plan.action {
        FormatAction::SetBlockType(block_type) => (
            replaced.set_block_type(key, block_type)?,
            ChangeType::ChangeBlockType,
        ),
        FormatAction::ToggleInlineStyle(style) => (
            replaced.toggle_inline_style(key, 0..rewritten_len, style)?,
            ChangeType::ChangeInlineStyle,
        ),
    };

    let caret = SelectionState::collapsed(key, rewritten_len);
    let mut next = state.push(content, caret, change);

    // Keep typing in the new style even when the rewritten block is empty.
    if let FormatAction::ToggleInlineStyle(style) = plan.action {
        let carried = next.current_inline_style().with(style);
        next = next.set_inline_style_override(Some(carried));
    }

    log::debug!(
        "autoformat {:?} applied to block {} ({} chars)",
        plan.action,
        key,
        rewritten_len
    );
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockType, ContentState, InlineStyle};
    use crate::error::EditorError;

    fn state_with(text: &str) -> EditorState {
        let content = ContentState::from_plain_text(text);
        let key = content.first_block().key();
        let len = text.chars().count();
        EditorState::create_with_content(content).force_selection(SelectionState::collapsed(key, len))
    }

    #[test]
    fn test_heading_rewrite() {
        let state = state_with("### Title");
        let plan = EditPlan {
            trigger_length: 9,
            rewritten_text: "Title".to_string(),
            action: FormatAction::SetBlockType(BlockType::HeaderOne),
        };

        let next = apply(&plan, &state).unwrap();
        let block = next.content().first_block();
        assert_eq!(block.text(), "Title");
        assert_eq!(block.block_type(), BlockType::HeaderOne);
        assert_eq!(next.selection().focus_offset, 5);
        assert_eq!(next.last_change_type(), Some(ChangeType::ChangeBlockType));
    }

    #[test]
    fn test_inline_rewrite_styles_whole_text() {
        let state = state_with("**alert");
        let plan = EditPlan {
            trigger_length: 7,
            rewritten_text: "alert".to_string(),
            action: FormatAction::ToggleInlineStyle(InlineStyle::Red),
        };

        let next = apply(&plan, &state).unwrap();
        let block = next.content().first_block();
        assert_eq!(block.text(), "alert");
        assert_eq!(block.block_type(), BlockType::Unstyled);
        assert!(block.has_style(0..5, InlineStyle::Red));
        assert!(next.current_inline_style().contains(InlineStyle::Red));
    }

    #[test]
    fn test_single_undo_step() {
        let state = state_with("*x");
        let plan = EditPlan {
            trigger_length: 2,
            rewritten_text: "x".to_string(),
            action: FormatAction::ToggleInlineStyle(InlineStyle::Bold),
        };

        let next = apply(&plan, &state).unwrap();
        assert_eq!(next.undo_depth(), state.undo_depth() + 1);

        let undone = next.undo();
        let block = undone.content().first_block();
        assert_eq!(block.text(), "*x");
        assert!(block.styles().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_empty_rewrite_keeps_style_for_typing() {
        let state = state_with("*");
        let plan = EditPlan {
            trigger_length: 1,
            rewritten_text: String::new(),
            action: FormatAction::ToggleInlineStyle(InlineStyle::Bold),
        };

        let next = apply(&plan, &state).unwrap();
        assert_eq!(next.content().plain_text(), "");
        assert!(next.current_inline_style().contains(InlineStyle::Bold));
    }

    #[test]
    fn test_out_of_range_plan_fails_without_change() {
        let state = state_with("*ab");
        let plan = EditPlan {
            trigger_length: 10,
            rewritten_text: "ab".to_string(),
            action: FormatAction::ToggleInlineStyle(InlineStyle::Bold),
        };

        let err = apply(&plan, &state).unwrap_err();
        assert!(matches!(err, EditorError::InvalidRange { end: 10, len: 3, .. }));
        assert_eq!(state.content().plain_text(), "*ab");
        assert!(!state.can_undo());
    }
}

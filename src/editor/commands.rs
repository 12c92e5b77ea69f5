//! Editing commands over `EditorState`
//!
//! The default behaviour behind key commands and toolbar buttons. Each
//! command takes the current state and returns the next one, or `None` when
//! the command had nothing to do.

use super::keys::KeyCommand;
use super::state::{ChangeType, EditorState};
use crate::document::{BlockType, InlineStyle, SelectionState};
use crate::error::EditorResult;

/// Insert typed text over the selection, styled like the caret
pub fn insert_characters(state: &EditorState, chars: &str) -> EditorResult<EditorState> {
    let style = state.current_inline_style();
    let (content, caret) = state
        .content()
        .insert_text(state.selection(), chars, style)?;
    Ok(state.push(content, caret, ChangeType::InsertCharacters))
}

/// Toggle an inline style
///
/// At a caret this only changes the style of the next typed characters.
/// Over a range the style is removed when the range start already has it
/// and applied otherwise.
pub fn toggle_inline_style(state: &EditorState, style: InlineStyle) -> EditorResult<EditorState> {
    let current = state.current_inline_style();
    let selection = state.selection();

    if selection.is_collapsed() {
        return Ok(state.set_inline_style_override(Some(current.toggled(style))));
    }

    let content = if current.contains(style) {
        state.content().remove_inline_style(selection, style)?
    } else {
        state.content().apply_inline_style(selection, style)?
    };
    Ok(state.push(content, *selection, ChangeType::ChangeInlineStyle))
}

/// Set every selected block to `block_type`, or back to unstyled if the
/// first selected block already has it
pub fn toggle_block_type(state: &EditorState, block_type: BlockType) -> EditorResult<EditorState> {
    let selection = state.selection();
    let start = selection.start(state.content());
    let current = state
        .content()
        .block_for_key(start.key)
        .map(|block| block.block_type())
        .unwrap_or_default();

    let target = if current == block_type {
        BlockType::Unstyled
    } else {
        block_type
    };
    let content = state.content().set_block_type_for(selection, target)?;
    Ok(state.push(content, *selection, ChangeType::ChangeBlockType))
}

/// Delete backwards from the caret, or the selection
///
/// At the very start of the document a styled block is reset to unstyled
/// instead. At the start of any other block it merges into the block above.
pub fn backspace(state: &EditorState) -> EditorResult<Option<EditorState>> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return remove_selection(state).map(Some);
    }

    let content = state.content();
    let key = selection.focus_key;
    let offset = selection.focus_offset;

    if offset > 0 {
        let range = SelectionState::in_block(key, offset - 1, offset);
        let (next, caret) = content.remove_range(&range)?;
        return Ok(Some(state.push(next, caret, ChangeType::BackspaceCharacter)));
    }

    match content.block_before(key) {
        None => {
            let is_styled = content
                .block_for_key(key)
                .is_some_and(|block| block.block_type() != BlockType::Unstyled);
            if !is_styled {
                return Ok(None);
            }
            let next = content.set_block_type(key, BlockType::Unstyled)?;
            Ok(Some(state.push(next, *selection, ChangeType::ChangeBlockType)))
        }
        Some(before) => {
            let range = SelectionState::new(before.key(), before.len(), key, 0);
            let (next, caret) = content.remove_range(&range)?;
            Ok(Some(state.push(next, caret, ChangeType::BackspaceCharacter)))
        }
    }
}

/// Delete forwards from the caret, or the selection
pub fn delete(state: &EditorState) -> EditorResult<Option<EditorState>> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return remove_selection(state).map(Some);
    }

    let content = state.content();
    let key = selection.focus_key;
    let offset = selection.focus_offset;
    let Some(idx) = content.block_index(key) else {
        return Ok(None);
    };
    let block = &content.blocks()[idx];

    let range = if offset < block.len() {
        SelectionState::in_block(key, offset, offset + 1)
    } else if let Some(after) = content.blocks().get(idx + 1) {
        SelectionState::new(key, offset, after.key(), 0)
    } else {
        return Ok(None);
    };

    let (next, caret) = content.remove_range(&range)?;
    Ok(Some(state.push(next, caret, ChangeType::DeleteCharacter)))
}

/// Split the block at the caret
pub fn split_block(state: &EditorState) -> EditorResult<EditorState> {
    let (content, caret) = state.content().split_block(state.selection())?;
    Ok(state.push(content, caret, ChangeType::SplitBlock))
}

/// Run a named key command
///
/// Returns `None` when the command did not apply to the current state.
pub fn handle_key_command(
    state: &EditorState,
    command: KeyCommand,
) -> EditorResult<Option<EditorState>> {
    log::trace!("key command {}", command);
    match command {
        KeyCommand::Bold => toggle_inline_style(state, InlineStyle::Bold).map(Some),
        KeyCommand::Italic => toggle_inline_style(state, InlineStyle::Italic).map(Some),
        KeyCommand::Underline => toggle_inline_style(state, InlineStyle::Underline).map(Some),
        KeyCommand::Code => toggle_inline_style(state, InlineStyle::Code).map(Some),
        KeyCommand::Backspace => backspace(state),
        KeyCommand::Delete => delete(state),
        KeyCommand::SplitBlock => split_block(state).map(Some),
        KeyCommand::Undo => Ok(state.can_undo().then(|| state.undo())),
        KeyCommand::Redo => Ok(state.can_redo().then(|| state.redo())),
    }
}

fn remove_selection(state: &EditorState) -> EditorResult<EditorState> {
    let (content, caret) = state.content().remove_range(state.selection())?;
    Ok(state.push(content, caret, ChangeType::RemoveRange))
}

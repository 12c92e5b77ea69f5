//! Editor state and undo/redo history
//!
//! `EditorState` is an immutable value: the current content, the selection,
//! an optional inline-style override for the next typed characters, and the
//! undo/redo stacks. Every transition returns a new value.
//!
//! History rules:
//! - Each `push` records one undoable step holding the state before it
//! - Runs of typing, backspacing or forward-deleting merge into one step
//!   while the caret is not moved in between
//! - History depth is bounded; the oldest steps are dropped first

use crate::config::MAX_UNDO_HISTORY;
use crate::document::{ContentState, SelectionState, StyleSet};
use std::fmt;
use std::sync::Arc;

/// Tag describing what a pushed change did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    InsertCharacters,
    BackspaceCharacter,
    DeleteCharacter,
    RemoveRange,
    SplitBlock,
    ChangeBlockType,
    ChangeInlineStyle,
    AdjustDepth,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::InsertCharacters => "insert-characters",
            ChangeType::BackspaceCharacter => "backspace-character",
            ChangeType::DeleteCharacter => "delete-character",
            ChangeType::RemoveRange => "remove-range",
            ChangeType::SplitBlock => "split-block",
            ChangeType::ChangeBlockType => "change-block-type",
            ChangeType::ChangeInlineStyle => "change-inline-style",
            ChangeType::AdjustDepth => "adjust-depth",
        }
    }

    /// Whether consecutive changes of this type merge into one undo step
    fn coalesces(&self) -> bool {
        matches!(
            self,
            ChangeType::InsertCharacters
                | ChangeType::BackspaceCharacter
                | ChangeType::DeleteCharacter
        )
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content plus the selection that went with it
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    content: ContentState,
    selection: SelectionState,
}

/// Immutable editor state
#[derive(Debug, Clone)]
pub struct EditorState {
    content: ContentState,
    selection: SelectionState,
    /// Styles for the next inserted characters, overriding the caret's style
    inline_style_override: Option<StyleSet>,
    /// Type of the last pushed change; `None` after undo, redo or a caret move
    last_change: Option<ChangeType>,
    undo_stack: Vec<Arc<Snapshot>>,
    redo_stack: Vec<Arc<Snapshot>>,
    max_history: usize,
    /// Version at last save (for detecting if we're at saved state)
    saved_version: usize,
    /// Current version (increments with each transition)
    current_version: usize,
}

impl EditorState {
    /// Create a state holding an empty document
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::new())
    }

    /// Create a state holding `content`, caret at the start of the first block
    pub fn create_with_content(content: ContentState) -> Self {
        let selection = SelectionState::collapsed(content.first_block().key(), 0);
        Self {
            content,
            selection,
            inline_style_override: None,
            last_change: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history: MAX_UNDO_HISTORY,
            saved_version: 0,
            current_version: 0,
        }
    }

    /// Copy with a different history bound
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history.max(1);
        self.trim_history();
        self
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change
    }

    pub fn inline_style_override(&self) -> Option<StyleSet> {
        self.inline_style_override
    }

    /// Styles the next typed character will carry
    ///
    /// The override wins when set. Otherwise a caret takes the style of the
    /// character before it, or the first character of its block, or the last
    /// character of the nearest non-empty block above. A range takes the
    /// style at its start.
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(style) = self.inline_style_override {
            return style;
        }

        let start = self.selection.start(&self.content);
        let Some(block) = self.content.block_for_key(start.key) else {
            return StyleSet::empty();
        };

        if !self.selection.is_collapsed() {
            return block.style_at(start.offset);
        }
        if start.offset > 0 {
            return block.style_at(start.offset - 1);
        }
        if !block.is_empty() {
            return block.style_at(0);
        }

        let idx = self.content.block_index(start.key).unwrap_or(0);
        self.content.blocks()[..idx]
            .iter()
            .rev()
            .find(|b| !b.is_empty())
            .map(|b| b.style_at(b.len() - 1))
            .unwrap_or_default()
    }

    /// Copy with a new selection; no history is recorded
    ///
    /// Moving the caret ends any run of typing for undo purposes.
    pub fn force_selection(&self, selection: SelectionState) -> Self {
        let mut next = self.clone();
        if next.selection != selection {
            next.last_change = None;
            next.inline_style_override = None;
        }
        next.selection = selection;
        next
    }

    /// Copy with an inline style override for the next typed characters
    pub fn set_inline_style_override(&self, style: Option<StyleSet>) -> Self {
        let mut next = self.clone();
        next.inline_style_override = style;
        next
    }

    /// Record `content` as the new current content in one undoable step
    pub fn push(
        &self,
        content: ContentState,
        selection_after: SelectionState,
        change: ChangeType,
    ) -> Self {
        let mut next = self.clone();

        let merges = change.coalesces() && self.last_change == Some(change);
        if !merges {
            next.undo_stack.push(Arc::new(Snapshot {
                content: self.content.clone(),
                selection: self.selection,
            }));
            next.trim_history();
        }

        log::trace!(
            "push {} (merged: {}, undo depth: {})",
            change,
            merges,
            next.undo_stack.len()
        );

        next.content = content;
        next.selection = selection_after;
        next.last_change = Some(change);
        next.inline_style_override = None;
        next.redo_stack.clear();
        next.current_version += 1;
        next
    }

    /// Step back one change; unchanged when there is nothing to undo
    pub fn undo(&self) -> Self {
        let mut next = self.clone();
        let Some(snapshot) = next.undo_stack.pop() else {
            return next;
        };

        next.redo_stack.push(Arc::new(Snapshot {
            content: self.content.clone(),
            selection: self.selection,
        }));
        next.content = snapshot.content.clone();
        next.selection = snapshot.selection;
        next.last_change = None;
        next.inline_style_override = None;
        next.current_version += 1;
        next
    }

    /// Re-apply the last undone change; unchanged when there is nothing to redo
    pub fn redo(&self) -> Self {
        let mut next = self.clone();
        let Some(snapshot) = next.redo_stack.pop() else {
            return next;
        };

        next.undo_stack.push(Arc::new(Snapshot {
            content: self.content.clone(),
            selection: self.selection,
        }));
        next.content = snapshot.content.clone();
        next.selection = snapshot.selection;
        next.last_change = None;
        next.inline_style_override = None;
        next.current_version += 1;
        next
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Copy marked as saved
    pub fn mark_saved(&self) -> Self {
        let mut next = self.clone();
        next.saved_version = next.current_version;
        next
    }

    /// Check if we're at the saved state
    pub fn is_at_saved_state(&self) -> bool {
        self.saved_version == self.current_version
    }

    fn trim_history(&mut self) {
        if self.undo_stack.len() > self.max_history {
            let excess = self.undo_stack.len() - self.max_history;
            self.undo_stack.drain(..excess);
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}

//! Selection state
//!
//! A selection is an anchor (where it started) and a focus (where the caret
//! is), each a block key plus a character offset. Start and end are resolved
//! against a `ContentState` because document order depends on block order.

use super::block::BlockKey;
use super::content::ContentState;

/// Text selection, possibly spanning blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub anchor_key: BlockKey,
    pub anchor_offset: usize,
    pub focus_key: BlockKey,
    pub focus_offset: usize,
}

/// A selection endpoint resolved to document order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPoint {
    pub key: BlockKey,
    pub offset: usize,
}

impl SelectionState {
    /// Create a selection from anchor to focus
    pub fn new(
        anchor_key: BlockKey,
        anchor_offset: usize,
        focus_key: BlockKey,
        focus_offset: usize,
    ) -> Self {
        Self {
            anchor_key,
            anchor_offset,
            focus_key,
            focus_offset,
        }
    }

    /// Create a collapsed selection (a caret)
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        Self::new(key, offset, key, offset)
    }

    /// Create a selection covering `start..end` of a single block
    pub fn in_block(key: BlockKey, start: usize, end: usize) -> Self {
        Self::new(key, start, key, end)
    }

    /// Check if selection is collapsed (no text selected)
    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key && self.anchor_offset == self.focus_offset
    }

    /// Whether anchor and focus sit in the same block
    pub fn is_single_block(&self) -> bool {
        self.anchor_key == self.focus_key
    }

    /// Get the endpoints in document order
    pub fn normalized(&self, content: &ContentState) -> (SelectionPoint, SelectionPoint) {
        let anchor = SelectionPoint {
            key: self.anchor_key,
            offset: self.anchor_offset,
        };
        let focus = SelectionPoint {
            key: self.focus_key,
            offset: self.focus_offset,
        };

        let anchor_idx = content.block_index(self.anchor_key);
        let focus_idx = content.block_index(self.focus_key);
        let anchor_first = match (anchor_idx, focus_idx) {
            (Some(a), Some(f)) if a != f => a < f,
            _ => self.anchor_offset <= self.focus_offset,
        };

        if anchor_first {
            (anchor, focus)
        } else {
            (focus, anchor)
        }
    }

    /// Get the start position (earlier in document)
    pub fn start(&self, content: &ContentState) -> SelectionPoint {
        self.normalized(content).0
    }

    /// Get the end position (later in document)
    pub fn end(&self, content: &ContentState) -> SelectionPoint {
        self.normalized(content).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed() {
        let key = BlockKey::new();
        assert!(SelectionState::collapsed(key, 3).is_collapsed());
        assert!(!SelectionState::in_block(key, 1, 3).is_collapsed());
    }

    #[test]
    fn test_normalized_backwards_selection() {
        let content = ContentState::from_plain_text("one\ntwo");
        let first = content.blocks()[0].key();
        let second = content.blocks()[1].key();

        let backwards = SelectionState::new(second, 1, first, 2);
        let (start, end) = backwards.normalized(&content);
        assert_eq!(start.key, first);
        assert_eq!(start.offset, 2);
        assert_eq!(end.key, second);

        let in_block = SelectionState::in_block(first, 3, 0);
        assert_eq!(in_block.start(&content).offset, 0);
        assert_eq!(in_block.end(&content).offset, 3);
    }
}

//! Immutable document content
//!
//! `ContentState` is an ordered list of blocks. Every mutation primitive
//! returns a new `ContentState`; unchanged blocks are shared between the old
//! and new value through `Arc`, so keeping snapshots for undo is cheap.
//!
//! Primitives that take a character range validate it against the live block
//! and fail with `EditorError::InvalidRange` instead of clamping. Nothing is
//! mutated when a primitive fails.

use super::block::{BlockKey, BlockType, ContentBlock};
use super::selection::{SelectionPoint, SelectionState};
use super::style::{InlineStyle, StyleSet};
use crate::error::{EditorError, EditorResult};
use regex::Regex;
use std::ops::{Range, RangeInclusive};
use std::sync::{Arc, OnceLock};

/// Line separators recognised when building content from plain text
fn line_separator() -> &'static Regex {
    static LINE_SEPARATOR: OnceLock<Regex> = OnceLock::new();
    LINE_SEPARATOR.get_or_init(|| Regex::new(r"\r\n?|\n").expect("valid line separator pattern"))
}

/// Snapshot of the whole document
#[derive(Debug, Clone, PartialEq)]
pub struct ContentState {
    /// Never empty
    blocks: Vec<Arc<ContentBlock>>,
}

impl ContentState {
    /// Create content holding a single empty unstyled block
    pub fn new() -> Self {
        Self {
            blocks: vec![Arc::new(ContentBlock::new(""))],
        }
    }

    /// Build unstyled content from plain text, one block per line
    pub fn from_plain_text(text: &str) -> Self {
        Self {
            blocks: line_separator()
                .split(text)
                .map(|line| Arc::new(ContentBlock::new(line)))
                .collect(),
        }
    }

    /// Build content from explicit blocks; an empty list gives `new()`
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        if blocks.is_empty() {
            return Self::new();
        }
        Self {
            blocks: blocks.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn blocks(&self) -> &[Arc<ContentBlock>] {
        &self.blocks
    }

    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    /// Position of a block in document order
    pub fn block_index(&self, key: BlockKey) -> Option<usize> {
        self.blocks.iter().position(|block| block.key() == key)
    }

    pub fn block_for_key(&self, key: BlockKey) -> Option<&ContentBlock> {
        self.block_index(key).map(|idx| self.blocks[idx].as_ref())
    }

    /// Text of a single block
    pub fn block_text(&self, key: BlockKey) -> Option<String> {
        self.block_for_key(key).map(ContentBlock::text)
    }

    /// The block immediately before `key`, if any
    pub fn block_before(&self, key: BlockKey) -> Option<&ContentBlock> {
        match self.block_index(key)? {
            0 => None,
            idx => Some(self.blocks[idx - 1].as_ref()),
        }
    }

    /// Whether the document holds any text
    ///
    /// More than one block counts as text even when every block is empty,
    /// since the line breaks themselves are content.
    pub fn has_text(&self) -> bool {
        self.blocks.len() > 1 || !self.blocks[0].is_empty()
    }

    /// All text, styling discarded, blocks joined by newlines
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace `range` of a block with `text`, styled with `style`
    pub fn replace_text(
        &self,
        key: BlockKey,
        range: Range<usize>,
        text: &str,
        style: StyleSet,
    ) -> EditorResult<Self> {
        let idx = self.require(key)?;
        let block = &self.blocks[idx];
        check_range(block, &range)?;
        Ok(self.with_block(idx, block.replacing(range, text, style)))
    }

    /// Assign a block type to one block
    pub fn set_block_type(&self, key: BlockKey, block_type: BlockType) -> EditorResult<Self> {
        let idx = self.require(key)?;
        Ok(self.with_block(idx, self.blocks[idx].retyped(block_type)))
    }

    /// Toggle an inline style over a range of one block
    ///
    /// The style is removed if every character already carries it and applied
    /// otherwise. An empty range leaves the content unchanged.
    pub fn toggle_inline_style(
        &self,
        key: BlockKey,
        range: Range<usize>,
        style: InlineStyle,
    ) -> EditorResult<Self> {
        let idx = self.require(key)?;
        let block = &self.blocks[idx];
        check_range(block, &range)?;
        if range.is_empty() {
            return Ok(self.clone());
        }

        let next = if block.has_style(range.clone(), style) {
            block.restyling(range, |set| set.without(style))
        } else {
            block.restyling(range, |set| set.with(style))
        };
        Ok(self.with_block(idx, next))
    }

    /// Assign a block type to every block touched by the selection
    pub fn set_block_type_for(
        &self,
        selection: &SelectionState,
        block_type: BlockType,
    ) -> EditorResult<Self> {
        let span = self.block_span(selection)?;
        let mut next = self.clone();
        for idx in span {
            next.blocks[idx] = Arc::new(self.blocks[idx].retyped(block_type));
        }
        Ok(next)
    }

    /// Apply an inline style across a selection
    pub fn apply_inline_style(
        &self,
        selection: &SelectionState,
        style: InlineStyle,
    ) -> EditorResult<Self> {
        self.restyle_selection(selection, |set| set.with(style))
    }

    /// Remove an inline style across a selection
    pub fn remove_inline_style(
        &self,
        selection: &SelectionState,
        style: InlineStyle,
    ) -> EditorResult<Self> {
        self.restyle_selection(selection, |set| set.without(style))
    }

    /// Delete the selected text, merging the first and last touched blocks
    ///
    /// Returns the new content and the caret where the selection started.
    pub fn remove_range(&self, selection: &SelectionState) -> EditorResult<(Self, SelectionState)> {
        let (start, end) = self.checked_points(selection)?;
        let start_idx = self.require(start.key)?;
        let end_idx = self.require(end.key)?;

        let head = &self.blocks[start_idx];
        let merged = if start_idx == end_idx {
            head.replacing(start.offset..end.offset, "", StyleSet::empty())
        } else {
            let tail = self.blocks[end_idx].split_at(end.offset).1;
            head.split_at(start.offset).0.joined(&tail)
        };

        let mut blocks = self.blocks.clone();
        blocks.splice(start_idx..=end_idx, std::iter::once(Arc::new(merged)));

        Ok((
            Self { blocks },
            SelectionState::collapsed(start.key, start.offset),
        ))
    }

    /// Replace the selection with `text`, every new character carrying `style`
    ///
    /// Returns the new content and the caret after the inserted text.
    pub fn insert_text(
        &self,
        selection: &SelectionState,
        text: &str,
        style: StyleSet,
    ) -> EditorResult<(Self, SelectionState)> {
        let (content, caret) = if selection.is_collapsed() {
            (self.clone(), *selection)
        } else {
            self.remove_range(selection)?
        };

        let offset = caret.focus_offset;
        let next = content.replace_text(caret.focus_key, offset..offset, text, style)?;
        let after = offset + text.chars().count();
        Ok((next, SelectionState::collapsed(caret.focus_key, after)))
    }

    /// Split the block at the caret, removing any selected text first
    ///
    /// Returns the new content and the caret at the start of the new block.
    pub fn split_block(&self, selection: &SelectionState) -> EditorResult<(Self, SelectionState)> {
        let (content, caret) = if selection.is_collapsed() {
            (self.clone(), *selection)
        } else {
            self.remove_range(selection)?
        };

        let idx = content.require(caret.focus_key)?;
        let block = &content.blocks[idx];
        check_range(block, &(caret.focus_offset..caret.focus_offset))?;

        let (head, tail) = block.split_at(caret.focus_offset);
        let tail_key = tail.key();
        let mut blocks = content.blocks.clone();
        blocks.splice(idx..=idx, [Arc::new(head), Arc::new(tail)]);

        Ok((Self { blocks }, SelectionState::collapsed(tail_key, 0)))
    }

    /// Shift the nesting depth of every selected block by `delta`
    ///
    /// Depths are clamped to `0..=max_depth`.
    pub fn adjust_depth(
        &self,
        selection: &SelectionState,
        delta: isize,
        max_depth: usize,
    ) -> EditorResult<Self> {
        let span = self.block_span(selection)?;
        let mut next = self.clone();
        for idx in span {
            let block = &self.blocks[idx];
            let depth = block
                .depth()
                .saturating_add_signed(delta)
                .min(max_depth);
            next.blocks[idx] = Arc::new(block.nested(depth));
        }
        Ok(next)
    }

    /// Content with the block at `idx` swapped for `block`
    fn with_block(&self, idx: usize, block: ContentBlock) -> Self {
        let mut blocks = self.blocks.clone();
        blocks[idx] = Arc::new(block);
        Self { blocks }
    }

    fn require(&self, key: BlockKey) -> EditorResult<usize> {
        self.block_index(key).ok_or_else(|| EditorError::UnknownBlock {
            key: key.to_string(),
        })
    }

    /// Selection endpoints in document order, each checked against its block
    fn checked_points(
        &self,
        selection: &SelectionState,
    ) -> EditorResult<(SelectionPoint, SelectionPoint)> {
        let (start, end) = selection.normalized(self);
        for point in [start, end] {
            let idx = self.require(point.key)?;
            check_range(&self.blocks[idx], &(point.offset..point.offset))?;
        }
        Ok((start, end))
    }

    fn block_span(&self, selection: &SelectionState) -> EditorResult<RangeInclusive<usize>> {
        let (start, end) = self.checked_points(selection)?;
        Ok(self.require(start.key)?..=self.require(end.key)?)
    }

    fn restyle_selection<F>(&self, selection: &SelectionState, f: F) -> EditorResult<Self>
    where
        F: Fn(StyleSet) -> StyleSet + Copy,
    {
        let (start, end) = self.checked_points(selection)?;
        let span = self.block_span(selection)?;
        let (first, last) = (*span.start(), *span.end());

        let mut next = self.clone();
        for idx in span {
            let block = &self.blocks[idx];
            let from = if idx == first { start.offset } else { 0 };
            let to = if idx == last { end.offset } else { block.len() };
            next.blocks[idx] = Arc::new(block.restyling(from..to, f));
        }
        Ok(next)
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::new()
    }
}

fn check_range(block: &ContentBlock, range: &Range<usize>) -> EditorResult<()> {
    if range.start > range.end || range.end > block.len() {
        return Err(EditorError::InvalidRange {
            block: block.key().to_string(),
            start: range.start,
            end: range.end,
            len: block.len(),
        });
    }
    Ok(())
}

//! Blocks: paragraph-level units of a document
//!
//! A block holds a run of text, one inline `StyleSet` per character, a block
//! type and a list nesting depth. Blocks are never mutated in place; every
//! change produces a new block that shares the untouched parts of the rope.

use super::style::{InlineStyle, StyleSet};
use ropey::Rope;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockKey(Uuid);

impl BlockKey {
    /// Create a new unique block key
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Paragraph-level type of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    Blockquote,
    UnorderedListItem,
    OrderedListItem,
    CodeBlock,
}

impl BlockType {
    const ALL: [BlockType; 11] = [
        BlockType::Unstyled,
        BlockType::HeaderOne,
        BlockType::HeaderTwo,
        BlockType::HeaderThree,
        BlockType::HeaderFour,
        BlockType::HeaderFive,
        BlockType::HeaderSix,
        BlockType::Blockquote,
        BlockType::UnorderedListItem,
        BlockType::OrderedListItem,
        BlockType::CodeBlock,
    ];

    /// Name used by the renderer
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Unstyled => "unstyled",
            BlockType::HeaderOne => "header-one",
            BlockType::HeaderTwo => "header-two",
            BlockType::HeaderThree => "header-three",
            BlockType::HeaderFour => "header-four",
            BlockType::HeaderFive => "header-five",
            BlockType::HeaderSix => "header-six",
            BlockType::Blockquote => "blockquote",
            BlockType::UnorderedListItem => "unordered-list-item",
            BlockType::OrderedListItem => "ordered-list-item",
            BlockType::CodeBlock => "code-block",
        }
    }

    /// Whether Tab may change the nesting depth of this block
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            BlockType::UnorderedListItem | BlockType::OrderedListItem
        )
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("unknown block type: {}", s))
    }
}

/// A single block of content
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    key: BlockKey,
    block_type: BlockType,
    text: Rope,
    /// One entry per character of `text`
    styles: Vec<StyleSet>,
    depth: usize,
}

impl ContentBlock {
    /// Create an unstyled block holding `text`
    pub fn new(text: &str) -> Self {
        Self::with_type(text, BlockType::Unstyled)
    }

    /// Create a block of the given type holding `text`
    pub fn with_type(text: &str, block_type: BlockType) -> Self {
        let text = Rope::from_str(text);
        let styles = vec![StyleSet::empty(); text.len_chars()];
        Self {
            key: BlockKey::new(),
            block_type,
            text,
            styles,
            depth: 0,
        }
    }

    pub fn key(&self) -> BlockKey {
        self.key
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Block text as an owned string
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    /// Styles of the character at `offset`
    pub fn style_at(&self, offset: usize) -> StyleSet {
        self.styles.get(offset).copied().unwrap_or_default()
    }

    /// Per-character styles
    pub fn styles(&self) -> &[StyleSet] {
        &self.styles
    }

    /// Whether every character in `range` carries `style`
    ///
    /// An empty range never carries a style.
    pub fn has_style(&self, range: Range<usize>, style: InlineStyle) -> bool {
        !range.is_empty()
            && self
                .styles
                .get(range)
                .is_some_and(|sets| sets.iter().all(|set| set.contains(style)))
    }

    /// Copy with `range` replaced by `text`, every new character carrying `style`
    ///
    /// The range must lie inside the block; `ContentState` checks this.
    pub(crate) fn replacing(&self, range: Range<usize>, text: &str, style: StyleSet) -> Self {
        let mut next = self.clone();
        next.text.remove(range.clone());
        next.text.insert(range.start, text);
        let inserted = text.chars().count();
        next.styles
            .splice(range, std::iter::repeat(style).take(inserted));
        next
    }

    /// Copy with the characters in `range` restyled by `f`
    pub(crate) fn restyling<F>(&self, range: Range<usize>, f: F) -> Self
    where
        F: Fn(StyleSet) -> StyleSet,
    {
        let mut next = self.clone();
        for set in &mut next.styles[range] {
            *set = f(*set);
        }
        next
    }

    /// Copy split at `offset`; the tail gets a fresh key and the same type
    pub(crate) fn split_at(&self, offset: usize) -> (Self, Self) {
        let mut head = self.clone();
        let tail_text = head.text.split_off(offset);
        let tail_styles = head.styles.split_off(offset);
        let tail = Self {
            key: BlockKey::new(),
            block_type: self.block_type,
            text: tail_text,
            styles: tail_styles,
            depth: self.depth,
        };
        (head, tail)
    }

    /// Copy with `other`'s text and styles appended
    pub(crate) fn joined(&self, other: &ContentBlock) -> Self {
        let mut next = self.clone();
        let end = next.text.len_chars();
        next.text.insert(end, &other.text.to_string());
        next.styles.extend_from_slice(&other.styles);
        next
    }

    pub(crate) fn retyped(&self, block_type: BlockType) -> Self {
        Self {
            block_type,
            ..self.clone()
        }
    }

    pub(crate) fn nested(&self, depth: usize) -> Self {
        Self {
            depth,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_names() {
        assert_eq!(BlockType::HeaderOne.as_str(), "header-one");
        assert_eq!("blockquote".parse::<BlockType>(), Ok(BlockType::Blockquote));
        assert_eq!(BlockType::default(), BlockType::Unstyled);
        assert!("header-seven".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_replacing_keeps_styles_aligned() {
        let block = ContentBlock::new("hello world");
        let bold = StyleSet::only(InlineStyle::Bold);
        let next = block.replacing(0..5, "héllo!", bold);

        assert_eq!(next.text(), "héllo! world");
        assert_eq!(next.styles().len(), next.len());
        assert!(next.has_style(0..6, InlineStyle::Bold));
        assert!(!next.style_at(6).contains(InlineStyle::Bold));
        // Original untouched
        assert_eq!(block.text(), "hello world");
    }

    #[test]
    fn test_split_and_join() {
        let block = ContentBlock::with_type("abcdef", BlockType::Blockquote);
        let (head, tail) = block.split_at(2);
        assert_eq!(head.text(), "ab");
        assert_eq!(tail.text(), "cdef");
        assert_eq!(tail.block_type(), BlockType::Blockquote);
        assert_ne!(head.key(), tail.key());

        let joined = head.joined(&tail);
        assert_eq!(joined.text(), "abcdef");
        assert_eq!(joined.key(), block.key());
    }

    #[test]
    fn test_has_style_empty_range() {
        let block = ContentBlock::new("abc").restyling(0..3, |s| s.with(InlineStyle::Red));
        assert!(block.has_style(0..3, InlineStyle::Red));
        assert!(!block.has_style(1..1, InlineStyle::Red));
    }
}

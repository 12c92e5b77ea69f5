//! Presentation policy
//!
//! Pure functions the renderer asks about class names and inline styling.
//! Nothing here touches the document.

use crate::config::PresentationConfig;
use crate::document::{BlockType, ContentState, InlineStyle};

/// Whether the placeholder must be hidden
///
/// The placeholder only shows in an empty document whose first block is
/// still unstyled; an empty heading, for example, hides it.
pub fn placeholder_hidden(content: &ContentState) -> bool {
    !content.has_text() && content.first_block().block_type() != BlockType::Unstyled
}

/// Placeholder text to render, if any
///
/// Only an empty document shows a placeholder, and only while it is not
/// hidden.
pub fn placeholder_text<'a>(
    content: &ContentState,
    config: &'a PresentationConfig,
) -> Option<&'a str> {
    if content.has_text() || placeholder_hidden(content) || config.placeholder.is_empty() {
        return None;
    }
    Some(config.placeholder.as_str())
}

/// Dedicated class for a block type, if it has one
pub fn block_class_name(block_type: BlockType, config: &PresentationConfig) -> Option<&str> {
    match block_type {
        BlockType::Blockquote => Some(config.blockquote_class.as_str()),
        _ => None,
    }
}

/// Class list for the editing surface
pub fn editor_class_name(content: &ContentState, config: &PresentationConfig) -> String {
    if placeholder_hidden(content) {
        format!("{} {}", config.editor_class, config.hide_placeholder_class)
    } else {
        config.editor_class.clone()
    }
}

/// CSS declarations for inline styles with custom rendering
///
/// Styles not listed here use the renderer's built-in appearance.
pub fn inline_style_css(style: InlineStyle) -> Option<&'static [(&'static str, &'static str)]> {
    match style {
        InlineStyle::Code => Some(&[
            ("background-color", "rgba(0, 0, 0, 0.05)"),
            ("font-family", "\"Inconsolata\", \"Menlo\", \"Consolas\", monospace"),
            ("font-size", "16px"),
            ("padding", "2px"),
        ]),
        InlineStyle::Red => Some(&[("color", "red")]),
        InlineStyle::Underline => Some(&[("text-decoration", "underline")]),
        InlineStyle::Bold | InlineStyle::Italic => None,
    }
}

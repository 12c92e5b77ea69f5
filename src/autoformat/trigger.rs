//! Trigger table
//!
//! A fixed, ordered list of block-start prefixes that rewrite the block when
//! followed by a space. Rules are tried in declaration order and the first
//! match wins, so a longer prefix must be declared before any shorter prefix
//! it starts with.

use crate::document::{BlockType, InlineStyle};

/// Whether a rule changes the whole block or styles its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerScope {
    Block,
    Inline,
}

/// What a matched trigger does to the rewritten block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    SetBlockType(BlockType),
    ToggleInlineStyle(InlineStyle),
}

/// One prefix and the formatting it triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerRule {
    pub prefix: &'static str,
    pub scope: TriggerScope,
    pub action: FormatAction,
}

/// Rules in priority order
pub static TRIGGERS: [TriggerRule; 4] = [
    TriggerRule {
        prefix: "***",
        scope: TriggerScope::Inline,
        action: FormatAction::ToggleInlineStyle(InlineStyle::Underline),
    },
    TriggerRule {
        prefix: "**",
        scope: TriggerScope::Inline,
        action: FormatAction::ToggleInlineStyle(InlineStyle::Red),
    },
    TriggerRule {
        prefix: "*",
        scope: TriggerScope::Inline,
        action: FormatAction::ToggleInlineStyle(InlineStyle::Bold),
    },
    TriggerRule {
        prefix: "#",
        scope: TriggerScope::Block,
        action: FormatAction::SetBlockType(BlockType::HeaderOne),
    },
];

/// Find the rule whose prefix starts `block_text`
///
/// No match is the common case, not an error.
pub fn match_trigger(block_text: &str) -> Option<&'static TriggerRule> {
    TRIGGERS
        .iter()
        .find(|rule| block_text.starts_with(rule.prefix))
}

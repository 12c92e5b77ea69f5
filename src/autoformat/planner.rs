//! Edit planner
//!
//! Decides, for one "before insert" event, whether a trigger fires and what
//! the block should be rewritten to. Planning never touches the document.

use super::trigger::{match_trigger, FormatAction, TriggerScope};
use crate::document::SelectionState;
use regex::Regex;
use std::sync::OnceLock;

/// The only inserted text that can fire a trigger
pub const TRIGGER_CHAR: &str = " ";

/// A rewrite computed for one keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPlan {
    /// Characters to replace, counted from the start of the block
    pub trigger_length: usize,
    /// Text that replaces them
    pub rewritten_text: String,
    pub action: FormatAction,
}

fn heading_marker() -> &'static Regex {
    static HEADING_MARKER: OnceLock<Regex> = OnceLock::new();
    HEADING_MARKER.get_or_init(|| Regex::new(r"^#+\s*").expect("valid heading marker pattern"))
}

/// Plan a rewrite of `block_text` for the text about to be inserted
///
/// Only a single space typed at a caret can fire; ranges, pastes and any
/// other character are left to the default insertion path. The whole block,
/// not just the prefix, is the span to replace.
pub fn plan(selection: &SelectionState, block_text: &str, inserted: &str) -> Option<EditPlan> {
    if !selection.is_collapsed() || inserted != TRIGGER_CHAR {
        return None;
    }

    let rule = match_trigger(block_text)?;
    let rewritten_text = match rule.scope {
        TriggerScope::Block => heading_marker().replace(block_text, "").into_owned(),
        TriggerScope::Inline => block_text.replacen(rule.prefix, "", 1),
    };

    log::trace!(
        "trigger {:?} matched, rewriting {:?} to {:?}",
        rule.prefix,
        block_text,
        rewritten_text
    );

    Some(EditPlan {
        trigger_length: block_text.chars().count(),
        rewritten_text,
        action: rule.action,
    })
}

//! Key events, default key bindings and the Tab command
//!
//! Raw key events are resolved here before any text is inserted. Tab is
//! always consumed by the editor and turned into a list nesting change;
//! every other key goes through the default binding table.

use super::state::{ChangeType, EditorState};
use crate::error::EditorResult;
use std::fmt;
use std::str::FromStr;

/// Platform-independent key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Tab,
    Enter,
    Backspace,
    Delete,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyEvent {
    /// Create a key event with no modifiers
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    /// Create a key event with shift modifier
    pub fn shift(key: Key) -> Self {
        Self {
            shift: true,
            ..Self::new(key)
        }
    }

    /// Create a key event with control modifier
    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::new(key)
        }
    }

    /// Create a key event with control and shift modifiers
    pub fn ctrl_shift(key: Key) -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::new(key)
        }
    }
}

/// Named editor command a key binding resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Bold,
    Italic,
    Underline,
    Code,
    Backspace,
    Delete,
    SplitBlock,
    Undo,
    Redo,
}

impl KeyCommand {
    const ALL: [KeyCommand; 9] = [
        KeyCommand::Bold,
        KeyCommand::Italic,
        KeyCommand::Underline,
        KeyCommand::Code,
        KeyCommand::Backspace,
        KeyCommand::Delete,
        KeyCommand::SplitBlock,
        KeyCommand::Undo,
        KeyCommand::Redo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyCommand::Bold => "bold",
            KeyCommand::Italic => "italic",
            KeyCommand::Underline => "underline",
            KeyCommand::Code => "code",
            KeyCommand::Backspace => "backspace",
            KeyCommand::Delete => "delete",
            KeyCommand::SplitBlock => "split-block",
            KeyCommand::Undo => "undo",
            KeyCommand::Redo => "redo",
        }
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyCommand::ALL
            .into_iter()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| format!("unknown key command: {}", s))
    }
}

/// Outcome of handling one key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// The editor consumed the event
    Handled,
    /// The editor did nothing; the host may act on the event
    NotHandled,
    /// Not a structural key; carries the default binding, if any
    PassThroughBinding(Option<KeyCommand>),
}

/// Resolve the default binding for a key event
pub fn default_key_binding(event: &KeyEvent) -> Option<KeyCommand> {
    if event.alt {
        return None;
    }

    match (event.key, event.ctrl, event.shift) {
        (Key::Enter, false, _) => Some(KeyCommand::SplitBlock),
        (Key::Backspace, false, _) => Some(KeyCommand::Backspace),
        (Key::Delete, false, _) => Some(KeyCommand::Delete),
        (Key::Char(c), true, shift) => match (c.to_ascii_lowercase(), shift) {
            ('b', false) => Some(KeyCommand::Bold),
            ('i', false) => Some(KeyCommand::Italic),
            ('u', false) => Some(KeyCommand::Underline),
            ('j', false) => Some(KeyCommand::Code),
            ('z', false) => Some(KeyCommand::Undo),
            ('z', true) | ('y', false) => Some(KeyCommand::Redo),
            _ => None,
        },
        _ => None,
    }
}

/// Result of mapping a key event
#[derive(Debug, Clone)]
pub struct KeyMapping {
    pub result: CommandResult,
    /// New current state when the key changed the document
    pub state: Option<EditorState>,
}

/// Map a raw key event to a command
///
/// Tab indents (Shift+Tab outdents) the list item at the caret and is always
/// reported as handled, even when nothing could change. Other keys pass
/// through with their default binding.
pub fn map_key(event: &KeyEvent, state: &EditorState, max_depth: usize) -> EditorResult<KeyMapping> {
    if event.key != Key::Tab {
        return Ok(KeyMapping {
            result: CommandResult::PassThroughBinding(default_key_binding(event)),
            state: None,
        });
    }

    let next = indent_list(state, event.shift, max_depth)?;
    Ok(KeyMapping {
        result: CommandResult::Handled,
        state: next,
    })
}

/// Nest or un-nest the list item at the caret
///
/// Only list items following another list item move, and an item can be at
/// most one level deeper than the item before it. Returns `None` when
/// nothing changes.
pub fn indent_list(
    state: &EditorState,
    outdent: bool,
    max_depth: usize,
) -> EditorResult<Option<EditorState>> {
    let selection = state.selection();
    if !selection.is_single_block() {
        return Ok(None);
    }

    let content = state.content();
    let Some(block) = content.block_for_key(selection.anchor_key) else {
        return Ok(None);
    };
    if !block.block_type().is_list_item() {
        return Ok(None);
    }
    let Some(before) = content.block_before(block.key()) else {
        return Ok(None);
    };
    if !before.block_type().is_list_item() {
        return Ok(None);
    }
    if !outdent && block.depth() >= max_depth {
        return Ok(None);
    }

    let limit = (before.depth() + 1).min(max_depth);
    let delta = if outdent { -1 } else { 1 };
    let adjusted = content.adjust_depth(selection, delta, limit)?;
    if &adjusted == content {
        return Ok(None);
    }

    log::debug!(
        "{} list item {}",
        if outdent { "outdent" } else { "indent" },
        block.key()
    );
    Ok(Some(state.push(adjusted, *selection, ChangeType::AdjustDepth)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockType, ContentBlock, ContentState, SelectionState};

    fn list(depths: &[usize]) -> ContentState {
        let mut content = ContentState::from_blocks(
            depths
                .iter()
                .map(|_| ContentBlock::with_type("item", BlockType::UnorderedListItem))
                .collect(),
        );
        let keys: Vec<_> = content.blocks().iter().map(|b| b.key()).collect();
        for (key, depth) in keys.into_iter().zip(depths) {
            content = content
                .adjust_depth(&SelectionState::collapsed(key, 0), *depth as isize, 4)
                .unwrap();
        }
        content
    }

    fn caret_in(content: ContentState, idx: usize) -> EditorState {
        let key = content.blocks()[idx].key();
        EditorState::create_with_content(content).force_selection(SelectionState::collapsed(key, 0))
    }

    fn depths(state: &EditorState) -> Vec<usize> {
        state.content().blocks().iter().map(|b| b.depth()).collect()
    }

    #[test]
    fn test_default_bindings() {
        assert_eq!(
            default_key_binding(&KeyEvent::new(Key::Enter)),
            Some(KeyCommand::SplitBlock)
        );
        assert_eq!(
            default_key_binding(&KeyEvent::ctrl(Key::Char('b'))),
            Some(KeyCommand::Bold)
        );
        assert_eq!(
            default_key_binding(&KeyEvent::ctrl_shift(Key::Char('Z'))),
            Some(KeyCommand::Redo)
        );
        assert_eq!(default_key_binding(&KeyEvent::new(Key::Char('b'))), None);
        assert_eq!(default_key_binding(&KeyEvent::new(Key::Left)), None);
    }

    #[test]
    fn test_command_names_roundtrip() {
        for cmd in KeyCommand::ALL {
            assert_eq!(cmd.as_str().parse::<KeyCommand>(), Ok(cmd));
        }
    }

    #[test]
    fn test_non_tab_passes_through() {
        let state = EditorState::create_empty();
        let mapping = map_key(&KeyEvent::ctrl(Key::Char('u')), &state, 4).unwrap();
        assert_eq!(
            mapping.result,
            CommandResult::PassThroughBinding(Some(KeyCommand::Underline))
        );
        assert!(mapping.state.is_none());

        let mapping = map_key(&KeyEvent::new(Key::Char('q')), &state, 4).unwrap();
        assert_eq!(mapping.result, CommandResult::PassThroughBinding(None));
    }

    #[test]
    fn test_tab_on_plain_block_is_consumed() {
        let state = EditorState::create_empty();
        let mapping = map_key(&KeyEvent::new(Key::Tab), &state, 4).unwrap();
        assert_eq!(mapping.result, CommandResult::Handled);
        assert!(mapping.state.is_none());
    }

    #[test]
    fn test_tab_indents_list_item() {
        let state = caret_in(list(&[0, 0]), 1);
        let mapping = map_key(&KeyEvent::new(Key::Tab), &state, 4).unwrap();
        assert_eq!(mapping.result, CommandResult::Handled);

        let next = mapping.state.unwrap();
        assert_eq!(depths(&next), vec![0, 1]);
        assert_eq!(next.last_change_type(), Some(ChangeType::AdjustDepth));
    }

    #[test]
    fn test_tab_limited_by_previous_item() {
        let state = caret_in(list(&[0, 1]), 1);
        let mapping = map_key(&KeyEvent::new(Key::Tab), &state, 4).unwrap();
        assert_eq!(mapping.result, CommandResult::Handled);
        assert!(mapping.state.is_none());
    }

    #[test]
    fn test_tab_stops_at_max_depth() {
        let state = caret_in(list(&[0, 1, 2, 3, 4, 4]), 5);
        let mapping = map_key(&KeyEvent::new(Key::Tab), &state, 4).unwrap();
        assert_eq!(mapping.result, CommandResult::Handled);
        assert!(mapping.state.is_none());
    }

    #[test]
    fn test_shift_tab_outdents() {
        let state = caret_in(list(&[0, 1]), 1);
        let mapping = map_key(&KeyEvent::shift(Key::Tab), &state, 4).unwrap();
        assert_eq!(depths(&mapping.state.unwrap()), vec![0, 0]);

        let top = caret_in(list(&[0, 0]), 1);
        let mapping = map_key(&KeyEvent::shift(Key::Tab), &top, 4).unwrap();
        assert_eq!(mapping.result, CommandResult::Handled);
        assert!(mapping.state.is_none());
    }

    #[test]
    fn test_first_list_item_cannot_nest() {
        let state = caret_in(list(&[0, 0]), 0);
        assert!(indent_list(&state, false, 4).unwrap().is_none());
    }
}

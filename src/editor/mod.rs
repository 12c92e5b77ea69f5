//! Editor module for the autoformat engine
//!
//! Contains the event-handling layer over the document model:
//! - Editor state with undo/redo history
//! - Key event resolution and the Tab nesting command
//! - Editing commands behind key bindings and toolbar buttons
//! - The `Editor` dispatcher the host feeds input events into

pub mod commands;
pub mod keys;
pub mod state;

pub use keys::{
    default_key_binding, map_key, CommandResult, Key, KeyCommand, KeyEvent, KeyMapping,
};
pub use state::{ChangeType, EditorState};

use crate::autoformat;
use crate::config::EditorConfig;
use crate::document::{BlockType, ContentState, InlineStyle, SelectionState};
use crate::error::EditorResult;

/// What happened to text offered through `handle_before_input`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// A trigger fired and the block was rewritten; the text was consumed
    Handled,
    /// The text was inserted as typed
    Inserted,
}

/// Single-threaded dispatcher owning the current editor state
///
/// Each event is fully applied before the next one is accepted. A failed
/// event leaves the current state untouched.
pub struct Editor {
    state: EditorState,
    config: EditorConfig,
}

impl Editor {
    /// Create an editor holding an empty document
    pub fn new(config: EditorConfig) -> Self {
        Self::with_state(EditorState::create_empty(), config)
    }

    /// Create an editor around an existing state
    pub fn with_state(state: EditorState, config: EditorConfig) -> Self {
        let state = state.with_max_history(config.max_undo_history);
        Self { state, config }
    }

    /// Get the editor state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Replace the whole state, e.g. after restoring a session
    pub fn set_state(&mut self, state: EditorState) {
        self.state = state.with_max_history(self.config.max_undo_history);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentState {
        self.state.content()
    }

    pub fn selection(&self) -> &SelectionState {
        self.state.selection()
    }

    /// Move the caret or change the selection
    pub fn set_selection(&mut self, selection: SelectionState) {
        self.state = self.state.force_selection(selection);
    }

    /// Offer text about to be inserted at the selection
    ///
    /// Runs the autoformat planner once. When a trigger fires the block is
    /// rewritten and the text is consumed; otherwise it is inserted as typed.
    pub fn handle_before_input(&mut self, chars: &str) -> EditorResult<InputOutcome> {
        if chars.is_empty() {
            return Ok(InputOutcome::Inserted);
        }

        if self.config.autoformat {
            match autoformat::handle_before_input(&self.state, chars) {
                Ok(Some(next)) => {
                    self.state = next;
                    return Ok(InputOutcome::Handled);
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Autoformat aborted, document left unchanged: {}", e);
                    return Err(e);
                }
            }
        }

        self.state = commands::insert_characters(&self.state, chars)?;
        Ok(InputOutcome::Inserted)
    }

    /// Handle a raw key event
    ///
    /// Tab is always consumed. Keys with a default binding run that command;
    /// the binding is still reported so the host can see what ran.
    pub fn handle_key(&mut self, event: &KeyEvent) -> EditorResult<CommandResult> {
        let mapping = map_key(event, &self.state, self.config.max_list_depth)?;
        if let Some(next) = mapping.state {
            self.state = next;
        }

        if let CommandResult::PassThroughBinding(Some(command)) = mapping.result {
            self.handle_key_command(command)?;
        }
        Ok(mapping.result)
    }

    /// Run a named key command against the current state
    pub fn handle_key_command(&mut self, command: KeyCommand) -> EditorResult<CommandResult> {
        match commands::handle_key_command(&self.state, command)? {
            Some(next) => {
                log::debug!("key command {} handled", command);
                self.state = next;
                Ok(CommandResult::Handled)
            }
            None => Ok(CommandResult::NotHandled),
        }
    }

    /// Toolbar: toggle the block type of the selected blocks
    pub fn toggle_block_type(&mut self, block_type: BlockType) -> EditorResult<()> {
        self.state = commands::toggle_block_type(&self.state, block_type)?;
        Ok(())
    }

    /// Toolbar: toggle an inline style on the selection or the caret
    pub fn toggle_inline_style(&mut self, style: InlineStyle) -> EditorResult<()> {
        self.state = commands::toggle_inline_style(&self.state, style)?;
        Ok(())
    }

    /// Undo the last change, returns false if there was nothing to undo
    pub fn undo(&mut self) -> bool {
        if !self.state.can_undo() {
            return false;
        }
        self.state = self.state.undo();
        true
    }

    /// Redo the last undone change, returns false if there was nothing to redo
    pub fn redo(&mut self) -> bool {
        if !self.state.can_redo() {
            return false;
        }
        self.state = self.state.redo();
        true
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

//! Notebook Autoformat - input processing for the Cosmic Notebook rich-text editor
//!
//! Watches typing against a live document and rewrites short trigger
//! sequences into styled content, maps key commands to document edits, and
//! bridges the document to session storage.
//!
//! ```
//! use notebook_autoformat::{BlockType, Editor, InputOutcome};
//!
//! let mut editor = Editor::default();
//! for ch in "#Notes".chars() {
//!     editor.handle_before_input(&ch.to_string()).unwrap();
//! }
//! let key = editor.content().first_block().key();
//! editor.set_selection(notebook_autoformat::SelectionState::collapsed(key, 1));
//! assert_eq!(editor.handle_before_input(" ").unwrap(), InputOutcome::Handled);
//! assert_eq!(editor.content().first_block().block_type(), BlockType::HeaderOne);
//! assert_eq!(editor.content().plain_text(), "Notes");
//! ```

pub mod autoformat;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod presentation;
pub mod session;

pub use config::Config;
pub use document::{BlockKey, BlockType, ContentState, InlineStyle, SelectionState};
pub use editor::{CommandResult, Editor, EditorState, InputOutcome, Key, KeyCommand, KeyEvent};
pub use error::{AppError, AppResult, EditorError, EditorResult};

/// Default log filter when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info,notebook_autoformat=debug";

/// Initialize the logging system
///
/// Hosts call this once at start-up; later calls are ignored.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER);
    if env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized");
    }
}

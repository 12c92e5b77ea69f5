//! Rich-text document model
//!
//! The editing engine the autoformat layer runs against:
//! - Blocks with a type, nesting depth and per-character inline styles
//! - Selections addressed by block key and character offset
//! - Immutable content snapshots with validated mutation primitives

pub mod block;
pub mod content;
pub mod selection;
pub mod style;

pub use block::{BlockKey, BlockType, ContentBlock};
pub use content::ContentState;
pub use selection::{SelectionPoint, SelectionState};
pub use style::{InlineStyle, StyleSet};

//! Prompt input for h.
//!
//! When no `--prompt` is given, the prompt is composed in the user's editor
//! and archived in the data directory.

pub mod editor;

pub use editor::Editor;

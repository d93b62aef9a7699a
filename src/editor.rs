//! Multi-line SPARQL editor
//!
//! Wraps a `tui_textarea::TextArea`. Text the controller loads (a picked
//! query) is pulled in by revision; typed text is pushed back as an edit.

mod editor_render;
mod editor_state;

pub use editor_render::render_editor;
pub use editor_state::QueryEditor;

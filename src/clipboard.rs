//! Copy pane contents to the clipboard
//!
//! Backends: the system clipboard (via arboard), OSC 52 escape sequences for
//! remote terminals, and auto mode (system with OSC 52 fallback).

mod backend;
pub mod clipboard_events;
mod osc52;
mod system;

pub use backend::{ClipboardError, copy_to_clipboard};

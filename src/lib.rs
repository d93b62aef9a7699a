//! ldfq library - Interactive Linked Data Fragments query tool
//!
//! This library exposes the query widget controller, the reference LDF
//! engine and the terminal front end for testing purposes.

pub mod app;
pub mod clipboard;
pub mod collection;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod help;
pub mod input;
pub mod notification;
pub mod picker;
pub mod results;
pub mod scroll;

#[cfg(test)]
pub mod test_utils;
pub mod theme;
pub mod widget;
pub mod widgets;

// Re-export commonly used types for convenience
pub use app::{App, Focus, OutputMode};
pub use config::Config;
pub use widget::{QueryController, WidgetEvent, WidgetOptions};

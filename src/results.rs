//! Results and log panes
//!
//! Both panes show a `TextPane` from the controller. URLs are rendered as
//! underlined links, and the view follows appended text until the user
//! scrolls up.

pub mod results_events;
mod results_render;

pub use results_render::{PaneKind, render_pane};

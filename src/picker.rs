//! Dropdowns for the start fragment and query pickers
//!
//! Both pickers are `Selection`s owned by the controller. While a dropdown
//! is open it takes every key: arrows move the highlight, typed characters
//! filter, Enter confirms and Esc closes.

pub mod picker_events;
mod picker_render;

pub use picker_render::{render_dropdown, render_picker_field};

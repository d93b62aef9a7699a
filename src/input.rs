//! Start fragment field
//!
//! A single-line text field holding the start fragment URL(s). Typed text is
//! handed to the controller when committed (Enter, leaving the field or
//! executing); picking from the start fragment dropdown replaces it.

mod input_render;
mod input_state;

pub use input_render::render_field;
pub use input_state::FragmentField;

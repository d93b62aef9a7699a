//! Context-sensitive key hints at the bottom of the screen

pub mod help_line_render;

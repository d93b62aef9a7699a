//! Small rendering utilities shared by several components

pub mod popup;
pub mod scrollbar;

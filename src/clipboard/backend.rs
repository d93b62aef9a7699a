use thiserror::Error;

use super::{osc52, system};
use crate::config::ClipboardBackend;

pub type ClipboardResult = Result<(), ClipboardError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("System clipboard unavailable")]
    SystemUnavailable,
    #[error("Could not write to clipboard")]
    WriteError,
}

pub fn copy_to_clipboard(text: &str, backend: ClipboardBackend) -> ClipboardResult {
    match backend {
        ClipboardBackend::System => system::copy(text),
        ClipboardBackend::Osc52 => osc52::copy(text),
        ClipboardBackend::Auto => system::copy(text).or_else(|e| {
            log::debug!("{}, falling back to OSC 52", e);
            osc52::copy(text)
        }),
    }
}

//! OSC 52 clipboard backend, for SSH and tmux sessions

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::io::{self, Write};

use super::backend::{ClipboardError, ClipboardResult};

/// Ask the terminal to set its clipboard
pub fn copy(text: &str) -> ClipboardResult {
    let mut stdout = io::stdout();
    stdout
        .write_all(encode_osc52(text).as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|_| ClipboardError::WriteError)
}

/// `ESC ] 52 ; c ; <base64> BEL`, where `c` selects the clipboard
pub fn encode_osc52(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

//! Centralized theme configuration for all UI components.
//!
//! All colors and styles are defined here. When adding or modifying UI components:
//! - Add new colors to the appropriate module
//! - Use `theme::module::CONSTANT` in render files
//! - Do NOT hardcode `Color::*` values directly in render files
//!
//! Theme: Galaxy - Purple/pink accents with deep space blue background

use ratatui::style::{Color, Modifier, Style};

/// Core color palette - shared base colors.
/// Only use these directly when a component truly shares the same color.
pub mod palette {
    use super::*;

    pub const TEXT: Color = Color::Rgb(236, 236, 244);
    pub const TEXT_DIM: Color = Color::Rgb(90, 92, 119);
    pub const TEXT_MUTED: Color = Color::Rgb(130, 133, 158);

    pub const BG_DARK: Color = Color::Rgb(26, 26, 46);
    pub const BG_HOVER: Color = Color::Rgb(45, 45, 72);

    pub const CYAN: Color = Color::Rgb(0, 217, 255);
    pub const YELLOW: Color = Color::Rgb(255, 217, 61);
    pub const PINK: Color = Color::Rgb(255, 107, 157);

    // Shared cursor style (fragment field and query editor)
    pub const CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);
}

/// Start fragment field styles
pub mod input {
    use super::*;

    pub const BORDER_FOCUSED: Color = Color::Rgb(0, 217, 255);
    pub const BORDER_UNFOCUSED: Color = Color::Rgb(90, 92, 119);

    // Fragment name shown in the title when the URL is a known start fragment
    pub const FRAGMENT_NAME: Color = Color::Rgb(198, 120, 221);
    pub const TEXT: Color = Color::Rgb(236, 236, 244);
}

/// Query picker field and dropdown styles
pub mod picker {
    use super::*;

    pub const BORDER_FOCUSED: Color = Color::Rgb(0, 217, 255);
    pub const BORDER_UNFOCUSED: Color = Color::Rgb(90, 92, 119);
    pub const LABEL: Color = Color::Rgb(236, 236, 244);
    pub const PLACEHOLDER: Color = Color::Rgb(90, 92, 119);
    pub const EDITED_MARKER: Color = Color::Rgb(255, 217, 61);

    // Dropdown
    pub const DROPDOWN_BORDER: Color = Color::Rgb(0, 217, 255);
    pub const DROPDOWN_BG: Color = Color::Rgb(26, 26, 46);
    pub const FILTER: Color = Color::Rgb(255, 107, 157);
    pub const ITEM_NORMAL_FG: Color = Color::Rgb(180, 182, 200);
    pub const ITEM_SELECTED_FG: Color = Color::Rgb(26, 26, 46);
    pub const ITEM_SELECTED_BG: Color = Color::Rgb(0, 217, 255);
    pub const ITEM_SELECTED_MODIFIER: Modifier = Modifier::BOLD;
    pub const ITEM_CURRENT_INDICATOR: Color = Color::Rgb(107, 203, 119);
    pub const NO_MATCHES: Color = Color::Rgb(90, 92, 119);
}

/// Query editor styles
pub mod editor {
    use super::*;

    pub const BORDER_FOCUSED: Color = Color::Rgb(255, 217, 61);
    pub const BORDER_UNFOCUSED: Color = Color::Rgb(90, 92, 119);
    pub const TEXT_UNFOCUSED: Color = Color::Rgb(130, 133, 158);
    pub const EDITED_HINT: Color = Color::Rgb(255, 217, 61);
}

/// Results and log pane styles
pub mod results {
    use super::*;

    pub const BORDER_FOCUSED: Color = Color::Rgb(0, 217, 255);
    pub const BORDER_UNFOCUSED: Color = Color::Rgb(90, 92, 119);
    pub const TITLE: Color = Color::Rgb(0, 217, 255);

    pub const TEXT: Color = Color::Rgb(236, 236, 244);
    pub const LOG_TEXT: Color = Color::Rgb(130, 133, 158);
    pub const LINK: Style = Style::new()
        .fg(Color::Rgb(189, 147, 249))
        .add_modifier(Modifier::UNDERLINED);

    // Execution state indicators
    pub const RUNNING: Color = Color::Rgb(255, 217, 61);
    pub const FOLLOWING: Color = Color::Rgb(107, 203, 119);
}

/// Notification styles
pub mod notification {
    use super::*;

    pub struct NotificationColors {
        pub fg: Color,
        pub bg: Color,
        pub border: Color,
    }

    pub const INFO: NotificationColors = NotificationColors {
        fg: Color::Rgb(236, 236, 244),
        bg: Color::Rgb(55, 55, 85),
        border: Color::Rgb(130, 133, 158),
    };

    pub const WARNING: NotificationColors = NotificationColors {
        fg: Color::Rgb(26, 26, 46),
        bg: Color::Rgb(255, 217, 61),
        border: Color::Rgb(255, 217, 61),
    };
}

/// Help line (bottom status bar) styles
pub mod help_line {
    use super::*;

    pub const KEY: Color = Color::Rgb(130, 133, 158);
    pub const DESCRIPTION: Color = Color::Rgb(90, 92, 119);
    pub const SEPARATOR: Color = Color::Rgb(90, 92, 119);
    pub const ACTION_KEY: Color = Color::Rgb(0, 217, 255);
}

/// Scrollbar styles
pub mod scrollbar {
    use super::*;

    pub const DEFAULT: Color = Color::Rgb(0, 217, 255);
}

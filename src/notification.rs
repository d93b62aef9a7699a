//! Transient messages shown in the top-right corner
//!
//! Used for confirmations ("Copied results"), query set switches and
//! warnings such as an unreadable config file or query collection.

mod notification_render;
mod notification_state;

pub use notification_render::render_notification;
pub use notification_state::{NotificationState, NotificationType};

mod core;
pub mod format;
pub mod models;
mod panel;

pub use self::core::*;
pub use format::format_message;
pub use models::{Role, Transcript, Turn};
pub use panel::{ChatPanel, GREETING, GREETING_DETAIL, SUGGESTED_QUESTIONS};

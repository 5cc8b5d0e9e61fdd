//! Storage key names.
//!
//! The names match the keys the earlier static attendee pages wrote, so data
//! they left in the browser stays readable.

// Ephemeral (tab-scoped) keys.
pub const LOGGED_IN: &str = "loggedIn";
pub const USER_NAME: &str = "userName";
pub const USER_EMAIL: &str = "userEmail";
pub const ROLE: &str = "role";

// Durable (origin-scoped) keys.
pub const SESSION_MIRROR: &str = "eventease_session";
pub const USER_PROFILE: &str = "eventease_user";
pub const ANNOUNCEMENTS: &str = "eventease_announcements";
pub const CHAT_MESSAGES: &str = "lostFoundMessages";
pub const THEME: &str = "theme";

const ENTRY_PASS_PREFIX: &str = "qrData_";

/// Durable key holding the entry pass issued to `email`.
pub fn entry_pass_key(email: &str) -> String {
    format!("{ENTRY_PASS_PREFIX}{email}")
}

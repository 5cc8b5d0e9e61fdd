//! # SessionStore: typed access to ephemeral and durable storage
//!
//! [`SessionStore`] wraps two [`KeyValueStore`] backends: an **ephemeral** one
//! scoped to the browser tab (`sessionStorage`) and a **durable** one scoped to
//! the origin (`localStorage`). Controllers never touch raw keys; every record
//! goes through a typed accessor here.
//!
//! | Data | Backend | Format |
//! |------|---------|--------|
//! | session fields (`loggedIn`, `userName`, `userEmail`, `role`) | ephemeral | plain strings |
//! | session mirror (`eventease_session`) | durable | JSON `{isLoggedIn, user: {name, email}}` |
//! | signup profile (`eventease_user`) | durable | JSON [`UserProfile`] |
//! | entry passes (`qrData_<email>`) | durable | JSON [`EntryPass`] |
//! | announcements, chat log | durable | JSON arrays |
//! | theme | durable | plain string |
//!
//! Reads and writes are not transactional. Two tabs sharing durable storage
//! can overwrite each other's announcement or chat lists (last write wins).
//!
//! A collection that is present but does not parse reads as empty, and the
//! `save_*` calls refuse to write over it. The stored bytes stay untouched
//! until someone repairs or clears them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keys;
use crate::kv::KeyValueStore;
use crate::models::{
    Announcement, ChatMessage, EntryPass, Role, Session, ThemePreference, UserProfile,
};

const DEFAULT_DISPLAY_NAME: &str = "Attendee";

/// A stored collection exists but could not be parsed, so it was not replaced.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Saved data could not be read, so nothing was changed.")]
pub struct UnreadableData {
    pub key: &'static str,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionMirror {
    is_logged_in: bool,
    user: UserProfile,
}

/// Typed view over the portal's two storage scopes.
#[derive(Clone, Debug)]
pub struct SessionStore<S: KeyValueStore> {
    ephemeral: S,
    durable: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(ephemeral: S, durable: S) -> Self {
        Self { ephemeral, durable }
    }

    fn read_json<T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
        let raw = store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(key, error = %e, "discarding unreadable stored value");
                None
            }
        }
    }

    /// Fails when `key` holds something that is not a `Vec<T>`.
    fn guard_collection<T: DeserializeOwned>(&self, key: &'static str) -> Result<(), UnreadableData> {
        match self.durable.get(key) {
            Some(raw) if serde_json::from_str::<Vec<T>>(&raw).is_err() => {
                tracing::warn!(key, "refusing to overwrite unreadable collection");
                Err(UnreadableData { key })
            }
            _ => Ok(()),
        }
    }

    fn write_json<T: Serialize + ?Sized>(store: &S, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                store.set(key, &raw);
                tracing::debug!(key, bytes = raw.len(), "stored value");
            }
            Err(e) => tracing::error!(key, error = %e, "failed to serialise value"),
        }
    }

    // ---- session ----

    /// The active session: ephemeral fields first, then the durable mirror.
    pub fn session(&self) -> Option<Session> {
        if self.ephemeral.get(keys::LOGGED_IN).as_deref() == Some("true") {
            let display_name = self
                .ephemeral
                .get(keys::USER_NAME)
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
            let email = self
                .ephemeral
                .get(keys::USER_EMAIL)
                .unwrap_or_else(|| display_name.clone());
            let role = self
                .ephemeral
                .get(keys::ROLE)
                .and_then(|r| r.parse::<Role>().ok())
                .unwrap_or_default();
            return Some(Session {
                display_name,
                email,
                role,
                logged_in: true,
            });
        }

        let mirror: SessionMirror = Self::read_json(&self.durable, keys::SESSION_MIRROR)?;
        if !mirror.is_logged_in {
            return None;
        }
        let display_name = if mirror.user.name.is_empty() {
            DEFAULT_DISPLAY_NAME.to_string()
        } else {
            mirror.user.name
        };
        Some(Session {
            display_name,
            email: mirror.user.email,
            role: Role::User,
            logged_in: true,
        })
    }

    /// Write the session into ephemeral storage, optionally mirroring it durably.
    pub fn write_session(&self, session: &Session, mirror: bool) {
        self.ephemeral.set(keys::LOGGED_IN, "true");
        self.ephemeral.set(keys::USER_NAME, &session.display_name);
        self.ephemeral.set(keys::USER_EMAIL, &session.email);
        self.ephemeral.set(keys::ROLE, session.role.as_str());

        if mirror {
            let mirror = SessionMirror {
                is_logged_in: true,
                user: UserProfile {
                    name: session.display_name.clone(),
                    email: session.email.clone(),
                },
            };
            Self::write_json(&self.durable, keys::SESSION_MIRROR, &mirror);
        }
    }

    /// Drop the session from both scopes. Feature data and the theme survive.
    pub fn clear_session(&self) {
        self.ephemeral.clear();
        self.durable.remove(keys::SESSION_MIRROR);
    }

    pub fn profile(&self) -> Option<UserProfile> {
        Self::read_json(&self.durable, keys::USER_PROFILE)
    }

    pub fn save_profile(&self, profile: &UserProfile) {
        Self::write_json(&self.durable, keys::USER_PROFILE, profile);
    }

    // ---- entry passes ----

    pub fn entry_pass(&self, email: &str) -> Option<EntryPass> {
        Self::read_json(&self.durable, &keys::entry_pass_key(email))
    }

    /// Store a pass under its email, replacing any earlier one.
    pub fn put_entry_pass(&self, pass: &EntryPass) {
        Self::write_json(&self.durable, &keys::entry_pass_key(&pass.email), pass);
    }

    // ---- collections ----

    pub fn announcements(&self) -> Vec<Announcement> {
        Self::read_json(&self.durable, keys::ANNOUNCEMENTS).unwrap_or_default()
    }

    pub fn save_announcements(&self, announcements: &[Announcement]) -> Result<(), UnreadableData> {
        self.guard_collection::<Announcement>(keys::ANNOUNCEMENTS)?;
        Self::write_json(&self.durable, keys::ANNOUNCEMENTS, announcements);
        Ok(())
    }

    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        Self::read_json(&self.durable, keys::CHAT_MESSAGES).unwrap_or_default()
    }

    pub fn save_chat_messages(&self, messages: &[ChatMessage]) -> Result<(), UnreadableData> {
        self.guard_collection::<ChatMessage>(keys::CHAT_MESSAGES)?;
        Self::write_json(&self.durable, keys::CHAT_MESSAGES, messages);
        Ok(())
    }

    // ---- theme ----

    pub fn theme(&self) -> ThemePreference {
        self.durable
            .get(keys::THEME)
            .and_then(|t| t.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: ThemePreference) {
        self.durable.set(keys::THEME, theme.as_str());
    }

    /// Flip between light and dark and persist the result.
    pub fn toggle_theme(&self) -> ThemePreference {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }
}

//! # Browser Web Storage backend
//!
//! [`WebStorage`] is the [`KeyValueStore`] used on the **web platform**. It
//! writes straight into `window.localStorage` (durable, origin-scoped) or
//! `window.sessionStorage` (ephemeral, tab-scoped) via `web-sys`.
//!
//! The handle is a tiny `Copy`-able descriptor; the `Storage` object is looked
//! up on every call, which the browser serves from its own cache.
//!
//! All errors are swallowed. Storage can be disabled (privacy mode) or full
//! (quota exceeded); both degrade to "nothing stored" instead of breaking the
//! page.

use crate::kv::KeyValueStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    /// `window.localStorage`
    Local,
    /// `window.sessionStorage`
    Session,
}

#[derive(Clone, Copy, Debug)]
pub struct WebStorage {
    kind: StorageKind,
}

impl WebStorage {
    pub fn local() -> Self {
        Self {
            kind: StorageKind::Local,
        }
    }

    pub fn session() -> Self {
        Self {
            kind: StorageKind::Session,
        }
    }

    pub fn kind(&self) -> StorageKind {
        self.kind
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self.kind {
            StorageKind::Local => window.local_storage(),
            StorageKind::Session => window.session_storage(),
        };
        storage.ok().flatten()
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!(key, kind = ?self.kind, "storage write rejected");
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if storage.remove_item(key).is_err() {
            tracing::warn!(key, kind = ?self.kind, "storage remove rejected");
        }
    }

    fn clear(&self) {
        let Some(storage) = self.storage() else {
            return;
        };
        if storage.clear().is_err() {
            tracing::warn!(kind = ?self.kind, "storage clear rejected");
        }
    }
}

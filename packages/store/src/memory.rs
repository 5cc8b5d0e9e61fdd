use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::kv::KeyValueStore;

/// In-memory KeyValueStore for testing and native fallback.
///
/// Clones share the same map, like two handles on one browser `Storage`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::keys;
    use crate::models::{
        Announcement, ChatMessage, EntryPass, Priority, Role, Session, ThemePreference,
    };
    use crate::session_store::SessionStore;

    fn session_store() -> (SessionStore<MemoryStore>, MemoryStore, MemoryStore) {
        let ephemeral = MemoryStore::new();
        let durable = MemoryStore::new();
        (
            SessionStore::new(ephemeral.clone(), durable.clone()),
            ephemeral,
            durable,
        )
    }

    fn session(role: Role) -> Session {
        Session {
            display_name: "ana".to_string(),
            email: "ana@example.com".to_string(),
            role,
            logged_in: true,
        }
    }

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "v");
        assert_eq!(b.get("k").as_deref(), Some("v"));
        b.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn test_session_roundtrip() {
        let (store, ephemeral, durable) = session_store();

        // Initially no session
        assert!(store.session().is_none());

        store.write_session(&session(Role::Volunteer), false);
        assert_eq!(store.session(), Some(session(Role::Volunteer)));
        assert_eq!(ephemeral.get(keys::ROLE).as_deref(), Some("volunteer"));
        assert!(durable.get(keys::SESSION_MIRROR).is_none());
    }

    #[test]
    fn test_session_falls_back_to_durable_mirror() {
        let (store, ephemeral, _) = session_store();

        store.write_session(&session(Role::Volunteer), true);
        // A fresh tab has empty ephemeral storage
        ephemeral.clear();

        let restored = store.session().unwrap();
        assert_eq!(restored.display_name, "ana");
        assert_eq!(restored.email, "ana@example.com");
        // The mirror carries no role; fallback is always an attendee
        assert_eq!(restored.role, Role::User);
    }

    #[test]
    fn test_clear_session_keeps_feature_data() {
        let (store, _, durable) = session_store();

        store.write_session(&session(Role::User), true);
        store.set_theme(ThemePreference::Dark);
        store.put_entry_pass(&EntryPass {
            email: "ana@example.com".to_string(),
            name: "ana".to_string(),
            event_code: "123456".to_string(),
            issued_at: DateTime::from_timestamp(10, 0).unwrap(),
        });

        store.clear_session();

        assert!(store.session().is_none());
        assert!(durable.get(keys::SESSION_MIRROR).is_none());
        assert_eq!(store.theme(), ThemePreference::Dark);
        assert!(store.entry_pass("ana@example.com").is_some());
    }

    #[test]
    fn test_entry_pass_keyed_by_email() {
        let (store, _, durable) = session_store();
        let pass = EntryPass {
            email: "ana@example.com".to_string(),
            name: "ana".to_string(),
            event_code: "654321".to_string(),
            issued_at: DateTime::from_timestamp(10, 0).unwrap(),
        };
        store.put_entry_pass(&pass);

        assert!(durable.get("qrData_ana@example.com").is_some());
        assert_eq!(store.entry_pass("ana@example.com"), Some(pass));
        assert!(store.entry_pass("bob@example.com").is_none());
    }

    #[test]
    fn test_corrupt_collection_is_not_overwritten() {
        let (store, _, durable) = session_store();
        durable.set(keys::ANNOUNCEMENTS, "{not json");
        assert!(store.announcements().is_empty());

        let item = Announcement {
            id: "announcement-1".to_string(),
            title: "Doors open".to_string(),
            content: "Hall B".to_string(),
            priority: Priority::Important,
            timestamp: DateTime::from_timestamp(1, 0).unwrap(),
            author: "vol".to_string(),
        };
        let err = store.save_announcements(&[item.clone()]).unwrap_err();
        assert_eq!(err.key, keys::ANNOUNCEMENTS);
        assert_eq!(durable.get(keys::ANNOUNCEMENTS).as_deref(), Some("{not json"));

        // Once cleared, saving works again.
        durable.remove(keys::ANNOUNCEMENTS);
        store.save_announcements(&[item.clone()]).unwrap();
        assert_eq!(store.announcements(), vec![item]);
    }

    #[test]
    fn test_legacy_chat_log_is_extended() {
        let (store, _, durable) = session_store();
        durable.set(
            keys::CHAT_MESSAGES,
            r#"[{"name":"Ana","text":"Lost my badge","time":"10:30","image":null}]"#,
        );

        let mut messages = store.chat_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].time.as_deref(), Some("10:30"));

        messages.push(ChatMessage {
            sender: "Ben".to_string(),
            text: "Found it".to_string(),
            image: None,
            timestamp: DateTime::from_timestamp(60, 0),
            time: None,
        });
        store.save_chat_messages(&messages).unwrap();

        let stored = store.chat_messages();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].sender, "Ana");
        assert_eq!(stored[0].time.as_deref(), Some("10:30"));
        assert_eq!(stored[1].sender, "Ben");
    }

    #[test]
    fn test_theme_toggle_persists() {
        let (store, _, durable) = session_store();
        assert_eq!(store.theme(), ThemePreference::Light);
        assert_eq!(store.toggle_theme(), ThemePreference::Dark);
        assert_eq!(durable.get(keys::THEME).as_deref(), Some("dark"));
        assert_eq!(store.theme(), ThemePreference::Dark);
    }
}

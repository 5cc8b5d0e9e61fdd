pub mod config;
pub mod keys;
pub mod models;

mod kv;
pub use kv::KeyValueStore;

mod memory;
pub use memory::MemoryStore;

mod session_store;
pub use session_store::{SessionStore, UnreadableData};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web_storage::{StorageKind, WebStorage};

pub use config::{AuthConfig, EmergencyConfig, EntryConfig, PortalConfig, ToastConfig, VolunteerAccount};
pub use models::{
    Announcement, ChatMessage, EmergencyRequest, EntryPass, GeoPoint, ParseError, Priority,
    PriorityFilter, Role, Session, ThemePreference, UserProfile,
};

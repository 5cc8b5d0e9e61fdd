//! Platform storage selection.
//!
//! - **Web** (WASM + `web` feature): `sessionStorage` / `localStorage` via [`store::WebStorage`]
//! - **Anything else**: process-local [`store::MemoryStore`]s, which is enough
//!   to render the pages in a native shell but keeps nothing across restarts.

use portal::AppState;
use store::{PortalConfig, SessionStore};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::WebStorage;

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::MemoryStore;

/// The state holder every page shares, provided once at the app root.
pub type PortalState = AppState<PlatformStore>;

pub fn make_state(config: PortalConfig) -> PortalState {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        AppState::new(
            SessionStore::new(store::WebStorage::session(), store::WebStorage::local()),
            config,
        )
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        AppState::new(
            SessionStore::new(store::MemoryStore::new(), store::MemoryStore::new()),
            config,
        )
    }
}

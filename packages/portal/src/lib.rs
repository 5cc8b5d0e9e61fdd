//! # Portal crate: controllers for the EventEase attendee portal
//!
//! Everything here is DOM-free. Each controller receives an [`AppState`] and a
//! typed view binding at construction, reads and writes the
//! [`store::SessionStore`], and tells its binding what to show. The `ui` crate
//! implements the bindings over Dioxus signals and the capability traits over
//! browser APIs; the tests in this crate use recording doubles instead.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Login (user and volunteer), signup, logout, current session |
//! | [`router`] | Single-visible-panel view switching with lazy first-show hooks |
//! | [`dashboard`] | Quick stats shown at the top of the dashboard |
//! | [`entry_pass`] | Issue, restore and scan QR entry passes |
//! | [`announcements`] | Volunteer-authored announcement board with priority filter |
//! | [`lost_found`] | Append-only lost-and-found chat with image attachments |
//! | [`emergency`] | Medical SOS with map and best-effort reverse geocoding |
//! | [`capability`] | Traits for the browser APIs and widgets controllers invoke |
//! | [`geocode`] | HTTP reverse geocoder |
//! | [`error`] | Validation, auth, capability and geocoding errors |
//!
//! Role checks in this crate decide what the UI offers. They are not access
//! control: all data lives in the visitor's own browser storage.

pub mod announcements;
pub mod auth;
pub mod capability;
pub mod dashboard;
pub mod emergency;
pub mod entry_pass;
pub mod error;
pub mod geocode;
pub mod lost_found;
pub mod notify;
pub mod router;

mod state;
pub use state::AppState;

#[cfg(test)]
mod testing;

pub use announcements::{AnnouncementsBinding, AnnouncementsController};
pub use auth::{Auth, LoginRequest, SignupRequest};
pub use dashboard::DashboardSummary;
pub use emergency::{
    EmergencyBinding, EmergencyController, LocationReport, SosStatus, MAP_CONTAINER,
};
pub use entry_pass::{
    EntryPassBinding, EntryPassController, PassPayload, ScanOutcome, QR_CONTAINER,
};
pub use error::{
    AuthError, BoardError, CapabilityError, GeocodeError, PostError, ValidationError,
};
pub use geocode::HttpGeocoder;
pub use lost_found::{ChatBinding, LostFoundController};
pub use notify::{Notify, ToastLevel};
pub use router::{NavBinding, UnknownView, ViewId, ViewRouter};

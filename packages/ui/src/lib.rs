//! This crate contains all shared UI for the portal: pages, feature panels,
//! and the browser-backed capabilities the controllers run against.

pub mod bindings;
pub mod capabilities;

mod platform;
pub use platform::{make_state, PlatformStore, PortalState};

mod theme;
pub use theme::{apply_theme, ThemeToggle};

mod toast;
pub use toast::{use_toaster, Toast, ToastProvider, Toaster};

pub mod views;

//! Browser implementations of the controller capability traits.
//!
//! On `wasm32` these call into `web-sys`, the page's `QRCode` (qrcodejs) and
//! `L` (Leaflet) globals, and `BarcodeDetector` for decoding camera frames.
//! Native builds get the same type names backed by stubs that report
//! [`portal::CapabilityError::Unsupported`].

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
pub use browser::{DeviceCamera, DeviceGeolocation, LeafletMap, QrCodeWidget, SleepTimer};

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(not(target_arch = "wasm32"))]
pub use native::{DeviceCamera, DeviceGeolocation, LeafletMap, QrCodeWidget, SleepTimer};

mod attachment;
pub use attachment::FileAttachment;

/// Element id of the scanner's `<video>` preview.
pub const SCANNER_VIDEO: &str = "scanner-preview";

/// Show a blocking alert. Falls back to a log line off the web.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!(message, "alert");
    }
}

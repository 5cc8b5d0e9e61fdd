//! # External capabilities
//!
//! Controllers invoke, but never own, the browser APIs and widget libraries
//! listed here. Each is a small trait so the UI crate can plug in the real
//! browser implementation and tests can plug in scripted doubles.
//!
//! | Trait | Browser counterpart |
//! |-------|---------------------|
//! | [`Clock`] | `Date.now()` |
//! | [`Timer`] | `setTimeout` |
//! | [`Geolocation`] | `navigator.geolocation.getCurrentPosition` |
//! | [`Camera`] / [`CaptureStream`] | `getUserMedia` + a QR frame decoder |
//! | [`ImageSource`] | a picked file read into a `data:` URL |
//! | [`QrRenderer`] | QR encode widget |
//! | [`MapWidget`] | map/tiles library |
//! | [`Geocoder`] | reverse geocoding over HTTP |
//!
//! Async methods return `impl Future` without a `Send` bound: everything runs
//! on the browser's single-threaded event loop.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use store::GeoPoint;

use crate::error::{CapabilityError, GeocodeError};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// A resolved device position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub point: GeoPoint,
    /// Accuracy radius in metres, when the device reports one.
    pub accuracy: Option<f64>,
}

/// Single-shot position lookup. No timeout is configured by the caller.
pub trait Geolocation {
    fn current_position(&self) -> impl Future<Output = Result<Position, CapabilityError>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FacingMode {
    User,
    #[default]
    Environment,
}

impl FacingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

pub trait Camera {
    type Stream: CaptureStream;

    fn open_stream(
        &self,
        facing: FacingMode,
    ) -> impl Future<Output = Result<Self::Stream, CapabilityError>>;
}

/// An open capture stream. Holding one keeps the camera device busy.
pub trait CaptureStream {
    /// Decode the current frame; `None` when no code is visible.
    fn decode(&self) -> impl Future<Output = Option<String>>;
    /// Stop every track. Must be safe to call more than once.
    fn stop(&self);
}

/// A user-picked image that can be inlined into a chat message.
pub trait ImageSource {
    fn read_data_url(self) -> impl Future<Output = Result<String, CapabilityError>>;
}

/// Stand-in type for "no attachment" so callers can pass `None::<NoAttachment>`.
#[derive(Debug)]
pub enum NoAttachment {}

impl ImageSource for NoAttachment {
    async fn read_data_url(self) -> Result<String, CapabilityError> {
        match self {}
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    #[default]
    High,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrOptions {
    pub text: String,
    pub size: u32,
    pub dark: String,
    pub light: String,
    pub level: ErrorCorrection,
}

pub trait QrRenderer {
    /// Render `options.text` as a QR image into the element with id `container`,
    /// replacing whatever was there.
    fn render(&self, container: &str, options: &QrOptions) -> Result<(), CapabilityError>;
}

pub trait MapWidget {
    type View;
    type Marker;

    fn create_view(
        &self,
        container: &str,
        center: GeoPoint,
        zoom: u8,
    ) -> Result<Self::View, CapabilityError>;
    fn set_view(&self, view: &Self::View, center: GeoPoint, zoom: u8);
    fn place_marker(
        &self,
        view: &Self::View,
        coords: GeoPoint,
        label: &str,
    ) -> Result<Self::Marker, CapabilityError>;
    fn relocate_marker(&self, marker: &Self::Marker, coords: GeoPoint);
}

/// Best-effort, network-dependent address lookup.
pub trait Geocoder {
    fn reverse_geocode(&self, point: GeoPoint)
        -> impl Future<Output = Result<String, GeocodeError>>;
}

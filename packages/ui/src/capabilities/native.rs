use std::time::Duration;

use portal::capability::{
    Camera, CaptureStream, FacingMode, Geolocation, MapWidget, Position, QrOptions, QrRenderer,
    Timer,
};
use portal::CapabilityError;
use store::GeoPoint;

fn unsupported(what: &str) -> CapabilityError {
    CapabilityError::Unsupported(format!("{what} is only available in the browser"))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DeviceGeolocation;

impl Geolocation for DeviceGeolocation {
    async fn current_position(&self) -> Result<Position, CapabilityError> {
        Err(unsupported("Geolocation"))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DeviceCamera {
    _video: &'static str,
}

impl DeviceCamera {
    pub fn new(video: &'static str) -> Self {
        Self { _video: video }
    }
}

pub struct NoStream;

impl CaptureStream for NoStream {
    async fn decode(&self) -> Option<String> {
        None
    }

    fn stop(&self) {}
}

impl Camera for DeviceCamera {
    type Stream = NoStream;

    async fn open_stream(&self, _facing: FacingMode) -> Result<NoStream, CapabilityError> {
        Err(unsupported("Camera access"))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct QrCodeWidget;

impl QrRenderer for QrCodeWidget {
    fn render(&self, _container: &str, _options: &QrOptions) -> Result<(), CapabilityError> {
        Err(unsupported("QR rendering"))
    }
}

#[derive(Clone, Debug)]
pub struct LeafletMap {
    _tile_url: String,
}

impl LeafletMap {
    pub fn new(tile_url: impl Into<String>) -> Self {
        Self {
            _tile_url: tile_url.into(),
        }
    }
}

impl MapWidget for LeafletMap {
    type View = ();
    type Marker = ();

    fn create_view(&self, _container: &str, _center: GeoPoint, _zoom: u8) -> Result<(), CapabilityError> {
        Err(unsupported("The map"))
    }

    fn set_view(&self, _view: &(), _center: GeoPoint, _zoom: u8) {}

    fn place_marker(&self, _view: &(), _coords: GeoPoint, _label: &str) -> Result<(), CapabilityError> {
        Err(unsupported("The map"))
    }

    fn relocate_marker(&self, _marker: &(), _coords: GeoPoint) {}
}

/// No event-loop timer off the web; sleeps complete immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepTimer;

impl Timer for SleepTimer {
    async fn sleep(&self, _duration: Duration) {}
}

use std::time::Duration;

use js_sys::{Array, Function, Object, Promise, Reflect};
use portal::capability::{
    Camera, CaptureStream, ErrorCorrection, FacingMode, Geolocation, MapWidget, Position,
    QrOptions, QrRenderer, Timer,
};
use portal::CapabilityError;
use store::GeoPoint;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

fn prop(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn set_prop(target: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}

fn js_message(err: &JsValue) -> String {
    prop(err, "message")
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

fn element(id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

// ---- geolocation ----

#[derive(Clone, Copy, Debug, Default)]
pub struct DeviceGeolocation;

impl Geolocation for DeviceGeolocation {
    async fn current_position(&self) -> Result<Position, CapabilityError> {
        let geolocation = web_sys::window()
            .and_then(|w| w.navigator().geolocation().ok())
            .ok_or_else(|| {
                CapabilityError::Unsupported("Geolocation is not supported by your browser.".into())
            })?;

        let promise = Promise::new(&mut |resolve: Function, reject: Function| {
            if let Err(e) = geolocation.get_current_position_with_error_callback(&resolve, Some(&reject)) {
                let _ = reject.call1(&JsValue::NULL, &e);
            }
        });

        let position = JsFuture::from(promise).await.map_err(|e| {
            let message = js_message(&e);
            // GeolocationPositionError.code 1 is PERMISSION_DENIED
            match prop(&e, "code").and_then(|c| c.as_f64()) {
                Some(code) if code == 1.0 => CapabilityError::PermissionDenied(message),
                _ => CapabilityError::Failed(message),
            }
        })?;

        let coords = prop(&position, "coords")
            .ok_or_else(|| CapabilityError::Failed("position has no coordinates".into()))?;
        let number = |key: &str| prop(&coords, key).and_then(|v| v.as_f64());
        let (Some(lat), Some(lng)) = (number("latitude"), number("longitude")) else {
            return Err(CapabilityError::Failed("position has no coordinates".into()));
        };
        Ok(Position {
            point: GeoPoint::new(lat, lng),
            accuracy: number("accuracy"),
        })
    }
}

// ---- camera ----

fn camera_error(err: &JsValue) -> CapabilityError {
    let message = js_message(err);
    match prop(err, "name").and_then(|n| n.as_string()).as_deref() {
        Some("NotAllowedError" | "SecurityError") => CapabilityError::PermissionDenied(message),
        Some("NotFoundError" | "NotSupportedError" | "OverconstrainedError") => {
            CapabilityError::Unsupported(message)
        }
        _ => CapabilityError::Failed(format!("Error accessing camera: {message}")),
    }
}

/// `getUserMedia` camera previewed in the `<video>` element with id `video`.
#[derive(Clone, Copy, Debug)]
pub struct DeviceCamera {
    video: &'static str,
}

impl DeviceCamera {
    pub fn new(video: &'static str) -> Self {
        Self { video }
    }
}

pub struct DeviceStream {
    stream: MediaStream,
    preview: Option<HtmlVideoElement>,
}

impl Camera for DeviceCamera {
    type Stream = DeviceStream;

    async fn open_stream(&self, facing: FacingMode) -> Result<DeviceStream, CapabilityError> {
        let devices = web_sys::window()
            .and_then(|w| w.navigator().media_devices().ok())
            .ok_or_else(|| {
                CapabilityError::Unsupported("Your browser does not support camera access".into())
            })?;

        let video = Object::new();
        set_prop(&video, "facingMode", &JsValue::from_str(facing.as_str()));
        let constraints = Object::new();
        set_prop(&constraints, "video", &video);

        let promise = devices
            .get_user_media_with_constraints(constraints.unchecked_ref::<MediaStreamConstraints>())
            .map_err(|e| camera_error(&e))?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| camera_error(&e))?
            .dyn_into()
            .map_err(|_| CapabilityError::Failed("camera returned no stream".into()))?;

        let preview = element(self.video).and_then(|el| el.dyn_into::<HtmlVideoElement>().ok());
        if let Some(preview) = &preview {
            preview.set_src_object(Some(&stream));
            if let Ok(playing) = preview.play() {
                let _ = JsFuture::from(playing).await;
            }
        }
        Ok(DeviceStream { stream, preview })
    }
}

impl CaptureStream for DeviceStream {
    async fn decode(&self) -> Option<String> {
        let preview = self.preview.as_ref()?;
        let ctor = prop(&js_sys::global(), "BarcodeDetector")?
            .dyn_into::<Function>()
            .ok()?;
        let options = Object::new();
        set_prop(&options, "formats", &Array::of1(&JsValue::from_str("qr_code")));
        let detector = Reflect::construct(&ctor, &Array::of1(&options)).ok()?;
        let detect = prop(&detector, "detect")?.dyn_into::<Function>().ok()?;
        let promise: Promise = detect.call1(&detector, preview).ok()?.dyn_into().ok()?;
        let codes: Array = JsFuture::from(promise).await.ok()?.dyn_into().ok()?;
        prop(&codes.get(0), "rawValue")?.as_string()
    }

    fn stop(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        if let Some(preview) = &self.preview {
            preview.set_src_object(None);
        }
    }
}

// ---- QR codes (qrcodejs) ----

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = QRCode)]
    type QrCodeJs;

    #[wasm_bindgen(constructor, js_class = "QRCode", catch)]
    fn new(container: &web_sys::Element, options: &JsValue) -> Result<QrCodeJs, JsValue>;
}

/// qrcodejs `QRCode.CorrectLevel` values.
fn correct_level(level: ErrorCorrection) -> f64 {
    match level {
        ErrorCorrection::Low => 1.0,
        ErrorCorrection::Medium => 0.0,
        ErrorCorrection::Quartile => 3.0,
        ErrorCorrection::High => 2.0,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct QrCodeWidget;

impl QrRenderer for QrCodeWidget {
    fn render(&self, container: &str, options: &QrOptions) -> Result<(), CapabilityError> {
        let target = element(container)
            .ok_or_else(|| CapabilityError::Failed(format!("no element #{container}")))?;
        target.set_inner_html("");

        let opts = Object::new();
        set_prop(&opts, "text", &JsValue::from_str(&options.text));
        set_prop(&opts, "width", &JsValue::from(options.size));
        set_prop(&opts, "height", &JsValue::from(options.size));
        set_prop(&opts, "colorDark", &JsValue::from_str(&options.dark));
        set_prop(&opts, "colorLight", &JsValue::from_str(&options.light));
        set_prop(&opts, "correctLevel", &JsValue::from_f64(correct_level(options.level)));

        QrCodeJs::new(&target, &opts)
            .map(drop)
            .map_err(|e| CapabilityError::Failed(js_message(&e)))
    }
}

// ---- maps (Leaflet) ----

#[wasm_bindgen]
extern "C" {
    pub type LeafletView;
    pub type LeafletMarker;
    type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = map, catch)]
    fn leaflet_map(container: &str) -> Result<LeafletView, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletView, center: &JsValue, zoom: u8);

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer, catch)]
    fn tile_layer(url: &str, options: &JsValue) -> Result<TileLayer, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &LeafletView);

    #[wasm_bindgen(js_namespace = L, js_name = marker, catch)]
    fn leaflet_marker(lat_lng: &JsValue) -> Result<LeafletMarker, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_marker_to(this: &LeafletMarker, map: &LeafletView);

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &LeafletMarker, content: &str);

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &LeafletMarker);

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &LeafletMarker, lat_lng: &JsValue);
}

fn lat_lng(point: GeoPoint) -> JsValue {
    Array::of2(&JsValue::from_f64(point.lat), &JsValue::from_f64(point.lng)).into()
}

fn map_error(err: JsValue) -> CapabilityError {
    CapabilityError::Failed(format!("Map unavailable: {}", js_message(&err)))
}

#[derive(Clone, Debug)]
pub struct LeafletMap {
    tile_url: String,
}

impl LeafletMap {
    pub fn new(tile_url: impl Into<String>) -> Self {
        Self {
            tile_url: tile_url.into(),
        }
    }
}

impl MapWidget for LeafletMap {
    type View = LeafletView;
    type Marker = LeafletMarker;

    fn create_view(
        &self,
        container: &str,
        center: GeoPoint,
        zoom: u8,
    ) -> Result<LeafletView, CapabilityError> {
        let view = leaflet_map(container).map_err(map_error)?;
        view.set_view(&lat_lng(center), zoom);

        let options = Object::new();
        set_prop(
            &options,
            "attribution",
            &JsValue::from_str("&copy; OpenStreetMap contributors"),
        );
        match tile_layer(&self.tile_url, &options) {
            Ok(tiles) => tiles.add_to(&view),
            Err(e) => tracing::warn!(error = %js_message(&e), "tile layer unavailable"),
        }
        Ok(view)
    }

    fn set_view(&self, view: &LeafletView, center: GeoPoint, zoom: u8) {
        view.set_view(&lat_lng(center), zoom);
    }

    fn place_marker(
        &self,
        view: &LeafletView,
        coords: GeoPoint,
        label: &str,
    ) -> Result<LeafletMarker, CapabilityError> {
        let marker = leaflet_marker(&lat_lng(coords)).map_err(map_error)?;
        marker.add_marker_to(view);
        marker.bind_popup(label);
        marker.open_popup();
        Ok(marker)
    }

    fn relocate_marker(&self, marker: &LeafletMarker, coords: GeoPoint) {
        marker.set_lat_lng(&lat_lng(coords));
    }
}

// ---- timers ----

#[derive(Clone, Copy, Debug, Default)]
pub struct SleepTimer;

impl Timer for SleepTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

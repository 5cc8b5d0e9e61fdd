//! Test doubles for the capability and binding traits.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use store::{
    Announcement, ChatMessage, EmergencyRequest, EntryPass, GeoPoint, MemoryStore, PortalConfig,
    PriorityFilter, Role, Session, SessionStore,
};

use crate::announcements::AnnouncementsBinding;
use crate::capability::{
    Camera, CaptureStream, Clock, FacingMode, Geocoder, Geolocation, ImageSource, MapWidget,
    Position, QrOptions, QrRenderer, Timer,
};
use crate::emergency::{EmergencyBinding, LocationReport, SosStatus};
use crate::entry_pass::{EntryPassBinding, ScanOutcome};
use crate::error::{CapabilityError, GeocodeError};
use crate::lost_found::ChatBinding;
use crate::notify::{Notify, ToastLevel};
use crate::router::{NavBinding, ViewId};
use crate::state::AppState;

/// Clock that starts at a fixed instant and advances one second per read.
pub struct StepClock {
    next: Cell<DateTime<Utc>>,
}

impl StepClock {
    pub fn starting_at(secs: i64) -> Self {
        Self {
            next: Cell::new(DateTime::from_timestamp(secs, 0).unwrap()),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.next.get();
        self.next.set(now + TimeDelta::seconds(1));
        now
    }
}

pub fn state() -> AppState<MemoryStore> {
    state_with(PortalConfig::default())
}

pub fn state_with(config: PortalConfig) -> AppState<MemoryStore> {
    let store = SessionStore::new(MemoryStore::new(), MemoryStore::new());
    AppState::new(store, config).with_clock(StepClock::starting_at(1_700_000_000))
}

/// State whose durable scope is `durable`, so a test can seed or inspect raw values.
pub fn state_on(durable: MemoryStore) -> AppState<MemoryStore> {
    let store = SessionStore::new(MemoryStore::new(), durable);
    AppState::new(store, PortalConfig::default()).with_clock(StepClock::starting_at(1_700_000_000))
}

pub fn log_in(state: &AppState<MemoryStore>, name: &str, role: Role) -> Session {
    let session = Session {
        display_name: name.to_string(),
        email: format!("{name}@example.com"),
        role,
        logged_in: true,
    };
    state.store().write_session(&session, false);
    session
}

/// Everything a binding was asked to show, in one shared log.
#[derive(Default)]
pub struct ViewLog {
    pub toasts: Vec<(ToastLevel, String)>,
    pub panels: HashMap<ViewId, bool>,
    pub nav: HashMap<ViewId, bool>,
    pub panel_writes: usize,
    // entry pass
    pub issue_form_shown: usize,
    pub shown_pass: Option<EntryPass>,
    pub scanner_shown: usize,
    pub scan_results: Vec<ScanOutcome>,
    pub scan_errors: Vec<CapabilityError>,
    pub scanning: Vec<bool>,
    // announcements
    pub composer_visible: Option<bool>,
    pub announcements: Vec<Announcement>,
    pub can_delete: Option<bool>,
    pub empty_message: Option<String>,
    pub filter: Option<PriorityFilter>,
    // chat
    pub messages: Vec<ChatMessage>,
    pub self_name: Option<String>,
    pub scrolls: usize,
    pub sending: Vec<bool>,
    pub resets: usize,
    // emergency
    pub volunteer_panel: Option<bool>,
    pub sos_enabled: Vec<bool>,
    pub statuses: Vec<SosStatus>,
    pub requests: Vec<EmergencyRequest>,
    pub reports: Vec<LocationReport>,
    pub addresses: Vec<String>,
}

#[derive(Clone, Default)]
pub struct RecordingView {
    pub log: Rc<RefCell<ViewLog>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_toast(&self) -> Option<(ToastLevel, String)> {
        self.log.borrow().toasts.last().cloned()
    }
}

impl Notify for RecordingView {
    fn toast(&self, level: ToastLevel, message: &str) {
        self.log
            .borrow_mut()
            .toasts
            .push((level, message.to_string()));
    }
}

impl NavBinding for RecordingView {
    fn set_panel_visible(&self, view: ViewId, visible: bool) {
        let mut log = self.log.borrow_mut();
        log.panels.insert(view, visible);
        log.panel_writes += 1;
    }

    fn set_nav_active(&self, view: ViewId, active: bool) {
        self.log.borrow_mut().nav.insert(view, active);
    }
}

impl EntryPassBinding for RecordingView {
    fn show_issue_form(&self) {
        self.log.borrow_mut().issue_form_shown += 1;
    }

    fn show_pass(&self, pass: &EntryPass) {
        self.log.borrow_mut().shown_pass = Some(pass.clone());
    }

    fn show_scanner(&self) {
        self.log.borrow_mut().scanner_shown += 1;
    }

    fn show_scan_result(&self, outcome: &ScanOutcome) {
        self.log.borrow_mut().scan_results.push(outcome.clone());
    }

    fn show_scan_error(&self, error: &CapabilityError) {
        self.log.borrow_mut().scan_errors.push(error.clone());
    }

    fn set_scanning(&self, scanning: bool) {
        self.log.borrow_mut().scanning.push(scanning);
    }
}

impl AnnouncementsBinding for RecordingView {
    fn set_composer_visible(&self, visible: bool) {
        self.log.borrow_mut().composer_visible = Some(visible);
    }

    fn render_announcements(
        &self,
        items: &[Announcement],
        filter: PriorityFilter,
        can_delete: bool,
    ) {
        let mut log = self.log.borrow_mut();
        log.announcements = items.to_vec();
        log.filter = Some(filter);
        log.can_delete = Some(can_delete);
        log.empty_message = None;
    }

    fn render_empty(&self, filter: PriorityFilter, message: &str) {
        let mut log = self.log.borrow_mut();
        log.announcements.clear();
        log.filter = Some(filter);
        log.empty_message = Some(message.to_string());
    }
}

impl ChatBinding for RecordingView {
    fn render_messages(&self, messages: &[ChatMessage], self_name: Option<&str>) {
        let mut log = self.log.borrow_mut();
        log.messages = messages.to_vec();
        log.self_name = self_name.map(str::to_string);
    }

    fn scroll_to_latest(&self) {
        self.log.borrow_mut().scrolls += 1;
    }

    fn set_sending(&self, sending: bool) {
        self.log.borrow_mut().sending.push(sending);
    }

    fn reset_form(&self) {
        self.log.borrow_mut().resets += 1;
    }
}

impl EmergencyBinding for RecordingView {
    fn set_volunteer_panel(&self, volunteer: bool) {
        self.log.borrow_mut().volunteer_panel = Some(volunteer);
    }

    fn set_sos_enabled(&self, enabled: bool) {
        self.log.borrow_mut().sos_enabled.push(enabled);
    }

    fn show_status(&self, status: &SosStatus) {
        self.log.borrow_mut().statuses.push(status.clone());
    }

    fn render_requests(&self, requests: &[EmergencyRequest]) {
        self.log.borrow_mut().requests = requests.to_vec();
    }

    fn show_location_report(&self, report: &LocationReport) {
        self.log.borrow_mut().reports.push(report.clone());
    }

    fn show_address(&self, address: &str) {
        self.log.borrow_mut().addresses.push(address.to_string());
    }
}

#[derive(Clone, Default)]
pub struct RecordingQr {
    pub rendered: Rc<RefCell<Vec<(String, QrOptions)>>>,
}

impl QrRenderer for RecordingQr {
    fn render(&self, container: &str, options: &QrOptions) -> Result<(), CapabilityError> {
        self.rendered
            .borrow_mut()
            .push((container.to_string(), options.clone()));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InstantTimer {
    pub slept: Rc<RefCell<Vec<Duration>>>,
}

impl Timer for InstantTimer {
    async fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

/// Timer that never fires.
pub struct NeverTimer;

impl Timer for NeverTimer {
    async fn sleep(&self, _duration: Duration) {
        std::future::pending::<()>().await
    }
}

pub struct FakeStream {
    payload: Option<String>,
    stops: Rc<Cell<usize>>,
}

impl CaptureStream for FakeStream {
    async fn decode(&self) -> Option<String> {
        self.payload.clone()
    }

    fn stop(&self) {
        self.stops.set(self.stops.get() + 1);
    }
}

/// Camera that either refuses to open or yields a stream showing `payload`.
pub struct FakeCamera {
    pub open: Result<Option<String>, CapabilityError>,
    pub stops: Rc<Cell<usize>>,
    pub facing: Cell<Option<FacingMode>>,
}

impl FakeCamera {
    pub fn showing(payload: Option<&str>) -> Self {
        Self {
            open: Ok(payload.map(str::to_string)),
            stops: Rc::default(),
            facing: Cell::new(None),
        }
    }

    pub fn failing(error: CapabilityError) -> Self {
        Self {
            open: Err(error),
            stops: Rc::default(),
            facing: Cell::new(None),
        }
    }
}

impl Camera for FakeCamera {
    type Stream = FakeStream;

    async fn open_stream(&self, facing: FacingMode) -> Result<FakeStream, CapabilityError> {
        self.facing.set(Some(facing));
        let payload = self.open.clone()?;
        Ok(FakeStream {
            payload,
            stops: self.stops.clone(),
        })
    }
}

pub struct FakeGeolocation(pub Result<Position, CapabilityError>);

impl FakeGeolocation {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self(Ok(Position {
            point: GeoPoint::new(lat, lng),
            accuracy: Some(12.4),
        }))
    }
}

impl Geolocation for FakeGeolocation {
    async fn current_position(&self) -> Result<Position, CapabilityError> {
        self.0.clone()
    }
}

pub struct FakeGeocoder(pub Result<String, GeocodeError>);

impl Geocoder for FakeGeocoder {
    async fn reverse_geocode(&self, _point: GeoPoint) -> Result<String, GeocodeError> {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct MapLog {
    pub views_created: Vec<(String, GeoPoint, u8)>,
    pub centers: Vec<(GeoPoint, u8)>,
    pub markers_placed: Vec<(GeoPoint, String)>,
    pub relocations: Vec<GeoPoint>,
}

#[derive(Clone, Default)]
pub struct FakeMap {
    pub log: Rc<RefCell<MapLog>>,
}

impl MapWidget for FakeMap {
    type View = ();
    type Marker = usize;

    fn create_view(&self, container: &str, center: GeoPoint, zoom: u8) -> Result<(), CapabilityError> {
        self.log
            .borrow_mut()
            .views_created
            .push((container.to_string(), center, zoom));
        Ok(())
    }

    fn set_view(&self, _view: &(), center: GeoPoint, zoom: u8) {
        self.log.borrow_mut().centers.push((center, zoom));
    }

    fn place_marker(&self, _view: &(), coords: GeoPoint, label: &str) -> Result<usize, CapabilityError> {
        let mut log = self.log.borrow_mut();
        log.markers_placed.push((coords, label.to_string()));
        Ok(log.markers_placed.len())
    }

    fn relocate_marker(&self, _marker: &usize, coords: GeoPoint) {
        self.log.borrow_mut().relocations.push(coords);
    }
}

/// Image whose read checks, while in flight, that no message was appended yet.
pub struct RecordingImage {
    pub url: &'static str,
    pub store: SessionStore<MemoryStore>,
    pub seen_during_read: Rc<Cell<Option<usize>>>,
}

impl ImageSource for RecordingImage {
    async fn read_data_url(self) -> Result<String, CapabilityError> {
        self.seen_during_read
            .set(Some(self.store.chat_messages().len()));
        Ok(self.url.to_string())
    }
}

pub struct BrokenImage;

impl ImageSource for BrokenImage {
    async fn read_data_url(self) -> Result<String, CapabilityError> {
        Err(CapabilityError::Failed("file could not be read".to_string()))
    }
}

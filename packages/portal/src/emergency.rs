//! # Medical SOS
//!
//! Attendees raise an SOS: the device position is looked up, an
//! [`EmergencyRequest`] is added to the in-memory active list, the map is
//! centred on the position with a marker, and an address lookup runs last.
//! The address is best-effort and never holds up the rest of the flow.
//!
//! Volunteers see the active list and respond to requests, which removes
//! them. Active requests live in page memory only and are gone after a reload.
//!
//! The map view is created on first use (normally from the router's
//! first-show hook for the emergency view) and kept for the page lifetime.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use store::{EmergencyRequest, GeoPoint, KeyValueStore};
use tracing::{debug, info, warn};

use crate::capability::{Geocoder, Geolocation, MapWidget};
use crate::error::CapabilityError;
use crate::notify::{Notify, ToastLevel};
use crate::state::AppState;

/// Element id the map is created in.
pub const MAP_CONTAINER: &str = "emergency-map";

const ANONYMOUS_USER: &str = "Anonymous User";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SosStatus {
    Sending,
    Sent,
    Failed(String),
}

impl SosStatus {
    pub fn message(&self) -> &str {
        match self {
            SosStatus::Sending => "Sending your location...",
            SosStatus::Sent => "Help request sent! Medical staff has been notified.",
            SosStatus::Failed(reason) => reason,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SosStatus::Failed(_))
    }
}

/// What the attendee sees after a successful SOS.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationReport {
    pub point: GeoPoint,
    pub accuracy: Option<f64>,
    pub reported_at: DateTime<Utc>,
}

impl LocationReport {
    pub fn coordinates(&self) -> String {
        self.point.to_string()
    }

    pub fn accuracy_text(&self) -> Option<String> {
        self.accuracy.map(|m| format!("±{} meters", m.round()))
    }
}

pub trait EmergencyBinding: Notify {
    /// Volunteers get the request list, attendees the SOS button.
    fn set_volunteer_panel(&self, volunteer: bool);
    fn set_sos_enabled(&self, enabled: bool);
    fn show_status(&self, status: &SosStatus);
    fn render_requests(&self, requests: &[EmergencyRequest]);
    fn show_location_report(&self, report: &LocationReport);
    fn show_address(&self, address: &str);
}

struct MapState<M: MapWidget> {
    view: M::View,
    marker: Option<M::Marker>,
}

pub struct EmergencyController<S: KeyValueStore, V: EmergencyBinding, M: MapWidget> {
    state: AppState<S>,
    view: V,
    widget: M,
    map: RefCell<Option<MapState<M>>>,
}

impl<S, V, M> EmergencyController<S, V, M>
where
    S: KeyValueStore,
    V: EmergencyBinding,
    M: MapWidget,
{
    pub fn new(state: AppState<S>, view: V, widget: M) -> Self {
        Self {
            state,
            view,
            widget,
            map: RefCell::new(None),
        }
    }

    pub fn enter(&self) {
        let volunteer = self
            .state
            .session()
            .is_some_and(|s| s.role.is_volunteer());
        self.view.set_volunteer_panel(volunteer);
        self.view.render_requests(&self.state.emergencies());
        self.view.set_sos_enabled(true);
    }

    pub fn map_ready(&self) -> bool {
        self.map.borrow().is_some()
    }

    /// Create the map view if it does not exist yet.
    pub fn init_map(&self) -> Result<(), CapabilityError> {
        if self.map_ready() {
            return Ok(());
        }
        let config = &self.state.config().emergency;
        let view = self
            .widget
            .create_view(MAP_CONTAINER, config.default_center, config.default_zoom)
            .inspect_err(|e| warn!(error = %e, "map unavailable"))?;
        *self.map.borrow_mut() = Some(MapState { view, marker: None });
        debug!("emergency map created");
        Ok(())
    }

    fn focus_map(&self, point: GeoPoint, user_name: &str) {
        if self.init_map().is_err() {
            return;
        }
        let mut slot = self.map.borrow_mut();
        let Some(map) = slot.as_mut() else {
            return;
        };
        let zoom = self.state.config().emergency.focus_zoom;
        self.widget.set_view(&map.view, point, zoom);
        if let Some(marker) = &map.marker {
            self.widget.relocate_marker(marker, point);
            return;
        }
        let label = format!("{user_name} needs help here");
        match self.widget.place_marker(&map.view, point, &label) {
            Ok(marker) => map.marker = Some(marker),
            Err(e) => warn!(error = %e, "could not place marker"),
        }
    }

    fn next_id(&self, at: DateTime<Utc>) -> String {
        let active = self.state.emergencies();
        let base = format!("emergency-{}", at.timestamp_millis());
        let mut id = base.clone();
        let mut n = 1;
        while active.iter().any(|e| e.id == id) {
            id = format!("{base}-{n}");
            n += 1;
        }
        id
    }

    pub async fn raise<G: Geolocation, C: Geocoder>(
        &self,
        geolocation: &G,
        geocoder: &C,
    ) -> Result<EmergencyRequest, CapabilityError> {
        self.view.set_sos_enabled(false);
        self.view.show_status(&SosStatus::Sending);

        let position = match geolocation.current_position().await {
            Ok(position) => position,
            Err(e) => {
                warn!(error = %e, "SOS position lookup failed");
                let (status, toast) = match &e {
                    CapabilityError::Unsupported(_) => (
                        "Your browser doesn't support geolocation.",
                        "Error: Your browser doesn't support geolocation.",
                    ),
                    _ => (
                        "Could not get your location. Please try again.",
                        "Error: Could not determine your location.",
                    ),
                };
                self.view.show_status(&SosStatus::Failed(status.to_string()));
                self.view.toast(ToastLevel::Error, toast);
                self.view.set_sos_enabled(true);
                return Err(e);
            }
        };

        let now = self.state.now();
        let user_name = self
            .state
            .session()
            .map(|s| s.display_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| ANONYMOUS_USER.to_string());
        let request = EmergencyRequest {
            id: self.next_id(now),
            user_name,
            location: position.point,
            timestamp: now,
        };
        self.state.push_emergency(request.clone());
        self.view.render_requests(&self.state.emergencies());
        self.focus_map(request.location, &request.user_name);

        self.view.show_location_report(&LocationReport {
            point: position.point,
            accuracy: position.accuracy,
            reported_at: now,
        });
        self.view.show_status(&SosStatus::Sent);
        self.view.toast(
            ToastLevel::Success,
            "Emergency alert sent successfully! Your location has been shared.",
        );
        self.view.set_sos_enabled(true);
        info!(id = %request.id, "SOS raised");

        let address = match geocoder.reverse_geocode(position.point).await {
            Ok(address) => address,
            Err(e) => {
                debug!(error = %e, "address lookup degraded");
                e.placeholder().to_string()
            }
        };
        self.view.show_address(&address);

        Ok(request)
    }

    /// Take the request off the active list. `None` if it was already gone.
    pub fn respond(&self, id: &str) -> Option<EmergencyRequest> {
        let request = self.state.take_emergency(id)?;
        info!(id, "responding to SOS");
        self.view.toast(
            ToastLevel::Info,
            &format!("Responding to {}'s emergency request", request.user_name),
        );
        self.view.render_requests(&self.state.emergencies());
        Some(request)
    }

    pub fn active(&self) -> Vec<EmergencyRequest> {
        self.state.emergencies()
    }
}

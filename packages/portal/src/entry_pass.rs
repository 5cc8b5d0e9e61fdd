//! # Entry passes
//!
//! Attendees issue a pass by entering a six-digit event code. The pass is
//! stored under their email and rendered as a QR code whose payload is
//! [`PassPayload`] as JSON. On later visits the stored pass is rendered
//! directly.
//!
//! Volunteers get the scanner instead: open the rear camera, observe for
//! `entry.scan_delay_secs`, decode one frame, release the camera, then show
//! whether the pass verified. The camera is released on every path out of
//! [`EntryPassController::scan`], including when the future is dropped.
//! Only one scan runs at a time; the binding is told when it starts and ends
//! so "scan again" can be disabled meanwhile.

use std::cell::Cell;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use store::{EntryPass, KeyValueStore};
use tracing::{info, warn};

use crate::capability::{
    Camera, CaptureStream, ErrorCorrection, FacingMode, QrOptions, QrRenderer, Timer,
};
use crate::error::{CapabilityError, ValidationError};
use crate::notify::{Notify, ToastLevel};
use crate::state::AppState;

/// Element id the QR code is rendered into.
pub const QR_CONTAINER: &str = "qrcode";

/// What a pass QR code encodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassPayload {
    pub email: String,
    pub code: String,
}

impl PassPayload {
    pub fn for_pass(pass: &EntryPass) -> Self {
        Self {
            email: pass.email.clone(),
            code: pass.event_code.clone(),
        }
    }

    pub fn encode(&self) -> String {
        serde_json::json!({ "email": self.email, "code": self.code }).to_string()
    }

    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw.trim()).ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    Verified(PassPayload),
    /// `raw` is `None` when no code was visible in the frame.
    Invalid { raw: Option<String> },
}

impl ScanOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, ScanOutcome::Verified(_))
    }
}

/// Accept exactly six ASCII digits, ignoring surrounding whitespace.
pub fn parse_event_code(code: &str) -> Result<&str, ValidationError> {
    let code = code.trim();
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(ValidationError::InvalidEventCode)
    }
}

pub trait EntryPassBinding: Notify {
    fn show_issue_form(&self);
    fn show_pass(&self, pass: &EntryPass);
    fn show_scanner(&self);
    fn show_scan_result(&self, outcome: &ScanOutcome);
    fn show_scan_error(&self, error: &CapabilityError);
    fn set_scanning(&self, scanning: bool);
}

/// Stops the stream when dropped.
struct StreamGuard<T: CaptureStream>(T);

impl<T: CaptureStream> Drop for StreamGuard<T> {
    fn drop(&mut self) {
        self.0.stop();
    }
}

/// Clears the in-flight flag when the scan ends or is dropped.
struct ScanGuard<'a, V: EntryPassBinding> {
    running: &'a Cell<bool>,
    view: &'a V,
}

impl<'a, V: EntryPassBinding> ScanGuard<'a, V> {
    fn start(running: &'a Cell<bool>, view: &'a V) -> Option<Self> {
        if running.replace(true) {
            return None;
        }
        view.set_scanning(true);
        Some(Self { running, view })
    }
}

impl<V: EntryPassBinding> Drop for ScanGuard<'_, V> {
    fn drop(&mut self) {
        self.running.set(false);
        self.view.set_scanning(false);
    }
}

pub struct EntryPassController<S: KeyValueStore, V: EntryPassBinding, Q: QrRenderer> {
    state: AppState<S>,
    view: V,
    qr: Q,
    scanning: Cell<bool>,
}

impl<S, V, Q> EntryPassController<S, V, Q>
where
    S: KeyValueStore,
    V: EntryPassBinding,
    Q: QrRenderer,
{
    pub fn new(state: AppState<S>, view: V, qr: Q) -> Self {
        Self {
            state,
            view,
            qr,
            scanning: Cell::new(false),
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning.get()
    }

    /// Set up the panel for whoever is logged in. Returns `true` when the
    /// caller should start the scanner.
    pub fn enter(&self) -> bool {
        match self.state.session() {
            Some(session) if session.role.is_volunteer() => {
                self.view.show_scanner();
                true
            }
            Some(_) => {
                self.restore();
                false
            }
            None => {
                self.view.show_issue_form();
                false
            }
        }
    }

    /// Render the stored pass for the current email, or the issue form.
    pub fn restore(&self) -> Option<EntryPass> {
        let pass = self
            .state
            .session()
            .and_then(|s| self.state.store().entry_pass(&s.email));
        match &pass {
            Some(pass) => self.render(pass),
            None => self.view.show_issue_form(),
        }
        pass
    }

    pub fn issue(&self, event_code: &str) -> Result<EntryPass, ValidationError> {
        let result = self.try_issue(event_code);
        match &result {
            Ok(pass) => {
                info!(email = %pass.email, "entry pass issued");
                self.render(pass);
                self.view
                    .toast(ToastLevel::Success, "Entry pass generated successfully!");
            }
            Err(e) => {
                warn!(error = %e, "entry pass rejected");
                self.view.toast(ToastLevel::Warning, &e.to_string());
            }
        }
        result
    }

    fn try_issue(&self, event_code: &str) -> Result<EntryPass, ValidationError> {
        let code = parse_event_code(event_code)?;
        let session = self.state.session().ok_or(ValidationError::SessionRequired)?;
        let pass = EntryPass {
            email: session.email,
            name: session.display_name,
            event_code: code.to_string(),
            issued_at: self.state.now(),
        };
        self.state.store().put_entry_pass(&pass);
        Ok(pass)
    }

    fn render(&self, pass: &EntryPass) {
        self.view.show_pass(pass);
        let entry = &self.state.config().entry;
        let options = QrOptions {
            text: PassPayload::for_pass(pass).encode(),
            size: entry.qr_size,
            dark: entry.qr_dark.clone(),
            light: entry.qr_light.clone(),
            level: ErrorCorrection::High,
        };
        if let Err(e) = self.qr.render(QR_CONTAINER, &options) {
            warn!(error = %e, "QR render failed");
            self.view
                .toast(ToastLevel::Error, "Could not draw the QR code.");
        }
    }

    /// Run one capture-and-decode pass. Also used for "scan again".
    pub async fn scan<C: Camera, T: Timer>(
        &self,
        camera: &C,
        timer: &T,
    ) -> Result<ScanOutcome, CapabilityError> {
        let Some(_scan) = ScanGuard::start(&self.scanning, &self.view) else {
            warn!("scan requested while another is running");
            return Err(CapabilityError::InUse("camera"));
        };
        self.view.show_scanner();
        let stream = match camera.open_stream(FacingMode::Environment).await {
            Ok(stream) => StreamGuard(stream),
            Err(e) => {
                warn!(error = %e, "camera unavailable");
                self.view.show_scan_error(&e);
                return Err(e);
            }
        };

        let delay = Duration::from_secs(self.state.config().entry.scan_delay_secs);
        timer.sleep(delay).await;
        let raw = stream.0.decode().await;
        drop(stream);

        let outcome = self.classify(raw.as_deref());
        info!(verified = outcome.is_verified(), "pass scanned");
        self.view.show_scan_result(&outcome);
        Ok(outcome)
    }

    pub fn classify(&self, raw: Option<&str>) -> ScanOutcome {
        let Some(raw) = raw else {
            return ScanOutcome::Invalid { raw: None };
        };
        let expected = self.state.config().entry.event_code.as_deref();
        match PassPayload::decode(raw) {
            Some(payload)
                if !payload.email.trim().is_empty()
                    && parse_event_code(&payload.code).is_ok()
                    && expected.is_none_or(|code| code == payload.code) =>
            {
                ScanOutcome::Verified(payload)
            }
            _ => ScanOutcome::Invalid {
                raw: Some(raw.to_string()),
            },
        }
    }
}

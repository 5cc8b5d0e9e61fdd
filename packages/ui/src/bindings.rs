//! Signal-backed implementations of the controller binding traits.
//!
//! Each binding is a bundle of [`Signal`]s owned by the dashboard. Controllers
//! write into them; the panel components read them to render.

use dioxus::prelude::*;
use portal::{
    AnnouncementsBinding, CapabilityError, ChatBinding, EmergencyBinding, EntryPassBinding,
    LocationReport, NavBinding, Notify, ScanOutcome, SosStatus, ToastLevel, ViewId,
};
use store::{Announcement, ChatMessage, EmergencyRequest, EntryPass, PriorityFilter};

use crate::toast::Toaster;

#[derive(Clone, Copy, PartialEq)]
pub struct NavView {
    pub visible: Signal<Option<ViewId>>,
    pub active: Signal<Option<ViewId>>,
}

impl NavView {
    pub fn new() -> Self {
        Self {
            visible: Signal::new(None),
            active: Signal::new(None),
        }
    }
}

fn toggle(mut slot: Signal<Option<ViewId>>, view: ViewId, on: bool) {
    if on {
        slot.set(Some(view));
    } else if *slot.peek() == Some(view) {
        slot.set(None);
    }
}

impl NavBinding for NavView {
    fn set_panel_visible(&self, view: ViewId, visible: bool) {
        toggle(self.visible, view, visible);
    }

    fn set_nav_active(&self, view: ViewId, active: bool) {
        toggle(self.active, view, active);
    }
}

// ---- entry pass ----

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TicketMode {
    #[default]
    Form,
    Pass,
    Scanner,
}

#[derive(Clone, Copy, PartialEq)]
pub struct EntryPassView {
    pub toaster: Toaster,
    pub mode: Signal<TicketMode>,
    pub pass: Signal<Option<EntryPass>>,
    pub result: Signal<Option<ScanOutcome>>,
    pub error: Signal<Option<String>>,
    pub scanning: Signal<bool>,
}

impl EntryPassView {
    pub fn new(toaster: Toaster) -> Self {
        Self {
            toaster,
            mode: Signal::new(TicketMode::Form),
            pass: Signal::new(None),
            result: Signal::new(None),
            error: Signal::new(None),
            scanning: Signal::new(false),
        }
    }
}

impl Notify for EntryPassView {
    fn toast(&self, level: ToastLevel, message: &str) {
        self.toaster.show(level, message);
    }
}

impl EntryPassBinding for EntryPassView {
    fn show_issue_form(&self) {
        let mut mode = self.mode;
        mode.set(TicketMode::Form);
    }

    fn show_pass(&self, pass: &EntryPass) {
        let (mut mode, mut slot) = (self.mode, self.pass);
        slot.set(Some(pass.clone()));
        mode.set(TicketMode::Pass);
    }

    fn show_scanner(&self) {
        let (mut mode, mut result, mut error) = (self.mode, self.result, self.error);
        mode.set(TicketMode::Scanner);
        result.set(None);
        error.set(None);
    }

    fn show_scan_result(&self, outcome: &ScanOutcome) {
        let mut result = self.result;
        result.set(Some(outcome.clone()));
    }

    fn show_scan_error(&self, e: &CapabilityError) {
        let mut error = self.error;
        error.set(Some(e.to_string()));
    }

    fn set_scanning(&self, scanning: bool) {
        let mut flag = self.scanning;
        flag.set(scanning);
    }
}

// ---- announcements ----

#[derive(Clone, Copy, PartialEq)]
pub struct AnnouncementsView {
    pub toaster: Toaster,
    pub composer: Signal<bool>,
    pub items: Signal<Vec<Announcement>>,
    pub filter: Signal<PriorityFilter>,
    pub can_delete: Signal<bool>,
    pub empty: Signal<Option<String>>,
}

impl AnnouncementsView {
    pub fn new(toaster: Toaster) -> Self {
        Self {
            toaster,
            composer: Signal::new(false),
            items: Signal::new(Vec::new()),
            filter: Signal::new(PriorityFilter::All),
            can_delete: Signal::new(false),
            empty: Signal::new(None),
        }
    }
}

impl Notify for AnnouncementsView {
    fn toast(&self, level: ToastLevel, message: &str) {
        self.toaster.show(level, message);
    }
}

impl AnnouncementsBinding for AnnouncementsView {
    fn set_composer_visible(&self, visible: bool) {
        let mut composer = self.composer;
        composer.set(visible);
    }

    fn render_announcements(&self, items: &[Announcement], filter: PriorityFilter, can_delete: bool) {
        let Self {
            items: mut slot,
            filter: mut current,
            can_delete: mut deletable,
            mut empty,
            ..
        } = *self;
        slot.set(items.to_vec());
        current.set(filter);
        deletable.set(can_delete);
        empty.set(None);
    }

    fn render_empty(&self, filter: PriorityFilter, message: &str) {
        let Self {
            mut items,
            filter: mut current,
            mut empty,
            ..
        } = *self;
        items.set(Vec::new());
        current.set(filter);
        empty.set(Some(message.to_string()));
    }
}

// ---- lost and found ----

#[derive(Clone, Copy, PartialEq)]
pub struct ChatView {
    pub toaster: Toaster,
    pub messages: Signal<Vec<ChatMessage>>,
    pub self_name: Signal<Option<String>>,
    pub sending: Signal<bool>,
    pub draft: Signal<String>,
    /// Bumped to remount the file input, which clears its selection.
    pub form_epoch: Signal<u32>,
    /// Bumped whenever the list should scroll to the newest message.
    pub scroll_ticks: Signal<u32>,
}

impl ChatView {
    pub fn new(toaster: Toaster) -> Self {
        Self {
            toaster,
            messages: Signal::new(Vec::new()),
            self_name: Signal::new(None),
            sending: Signal::new(false),
            draft: Signal::new(String::new()),
            form_epoch: Signal::new(0),
            scroll_ticks: Signal::new(0),
        }
    }
}

impl Notify for ChatView {
    fn toast(&self, level: ToastLevel, message: &str) {
        self.toaster.show(level, message);
    }
}

impl ChatBinding for ChatView {
    fn render_messages(&self, messages: &[ChatMessage], self_name: Option<&str>) {
        let (mut list, mut name) = (self.messages, self.self_name);
        list.set(messages.to_vec());
        name.set(self_name.map(str::to_string));
    }

    fn scroll_to_latest(&self) {
        let mut ticks = self.scroll_ticks;
        *ticks.write() += 1;
    }

    fn set_sending(&self, sending: bool) {
        let mut flag = self.sending;
        flag.set(sending);
    }

    fn reset_form(&self) {
        let (mut draft, mut epoch) = (self.draft, self.form_epoch);
        draft.set(String::new());
        *epoch.write() += 1;
    }
}

// ---- emergency ----

#[derive(Clone, Copy, PartialEq)]
pub struct EmergencyView {
    pub toaster: Toaster,
    pub volunteer: Signal<bool>,
    pub sos_enabled: Signal<bool>,
    pub status: Signal<Option<SosStatus>>,
    pub requests: Signal<Vec<EmergencyRequest>>,
    pub report: Signal<Option<LocationReport>>,
    pub address: Signal<Option<String>>,
    /// Set by the router the first time the emergency view is shown.
    pub map_wanted: Signal<bool>,
}

impl EmergencyView {
    pub fn new(toaster: Toaster) -> Self {
        Self {
            toaster,
            volunteer: Signal::new(false),
            sos_enabled: Signal::new(true),
            status: Signal::new(None),
            requests: Signal::new(Vec::new()),
            report: Signal::new(None),
            address: Signal::new(None),
            map_wanted: Signal::new(false),
        }
    }
}

impl Notify for EmergencyView {
    fn toast(&self, level: ToastLevel, message: &str) {
        self.toaster.show(level, message);
    }
}

impl EmergencyBinding for EmergencyView {
    fn set_volunteer_panel(&self, volunteer: bool) {
        let mut flag = self.volunteer;
        flag.set(volunteer);
    }

    fn set_sos_enabled(&self, enabled: bool) {
        let mut flag = self.sos_enabled;
        flag.set(enabled);
    }

    fn show_status(&self, status: &SosStatus) {
        let mut slot = self.status;
        slot.set(Some(status.clone()));
    }

    fn render_requests(&self, requests: &[EmergencyRequest]) {
        let mut list = self.requests;
        list.set(requests.to_vec());
    }

    fn show_location_report(&self, report: &LocationReport) {
        let (mut slot, mut address) = (self.report, self.address);
        slot.set(Some(report.clone()));
        address.set(None);
    }

    fn show_address(&self, text: &str) {
        let mut address = self.address;
        address.set(Some(text.to_string()));
    }
}

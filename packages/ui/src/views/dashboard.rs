//! The signed-in shell: header, navigation and the five feature panels.
//!
//! Controllers and their signal bindings are created once per mount and
//! shared with the panels through [`Panels`] context. Panels stay mounted
//! and are hidden with a class, so widget DOM (map, QR code) survives
//! switching views.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use portal::{
    AnnouncementsController, Auth, EmergencyController, EntryPassController, HttpGeocoder,
    LostFoundController, ViewId, ViewRouter,
};

use super::{AnnouncementsPanel, EmergencyPanel, LostFoundPanel, OverviewPanel, TicketPanel};
use crate::bindings::{AnnouncementsView, ChatView, EmergencyView, EntryPassView, NavView};
use crate::capabilities::{DeviceCamera, LeafletMap, QrCodeWidget, SleepTimer, SCANNER_VIDEO};
use crate::platform::{PlatformStore, PortalState};
use crate::theme::ThemeToggle;
use crate::toast::{use_toaster, Toaster};

pub type EntryPassCtl = EntryPassController<PlatformStore, EntryPassView, QrCodeWidget>;
pub type AnnouncementsCtl = AnnouncementsController<PlatformStore, AnnouncementsView>;
pub type ChatCtl = LostFoundController<PlatformStore, ChatView>;
pub type EmergencyCtl = EmergencyController<PlatformStore, EmergencyView, LeafletMap>;

/// Everything the panels need, shared through context.
#[derive(Clone)]
pub struct Panels {
    pub entry: Rc<EntryPassCtl>,
    pub entry_view: EntryPassView,
    pub announcements: Rc<AnnouncementsCtl>,
    pub announcements_view: AnnouncementsView,
    pub chat: Rc<ChatCtl>,
    pub chat_view: ChatView,
    pub emergency: Rc<EmergencyCtl>,
    pub emergency_view: EmergencyView,
    pub geocoder: HttpGeocoder,
}

impl Panels {
    fn new(state: PortalState, toaster: Toaster) -> Self {
        let entry_view = EntryPassView::new(toaster);
        let announcements_view = AnnouncementsView::new(toaster);
        let chat_view = ChatView::new(toaster);
        let emergency_view = EmergencyView::new(toaster);
        let tile_url = state.config().emergency.tile_url.clone();
        let geocoder = HttpGeocoder::from_config(&state.config().emergency);
        Self {
            entry: Rc::new(EntryPassController::new(
                state.clone(),
                entry_view,
                QrCodeWidget,
            )),
            entry_view,
            announcements: Rc::new(AnnouncementsController::new(
                state.clone(),
                announcements_view,
            )),
            announcements_view,
            chat: Rc::new(LostFoundController::new(state.clone(), chat_view)),
            chat_view,
            emergency: Rc::new(EmergencyController::new(
                state,
                emergency_view,
                LeafletMap::new(tile_url),
            )),
            emergency_view,
            geocoder,
        }
    }

    /// Run the per-view entry hook after the router switched to `view`.
    fn enter(&self, view: ViewId) {
        match view {
            ViewId::Dashboard => {}
            ViewId::Ticket => {
                if self.entry.enter() {
                    self.start_scan();
                }
            }
            ViewId::Announcements => self.announcements.enter(),
            ViewId::LostFound => self.chat.enter(),
            ViewId::Emergency => self.emergency.enter(),
        }
    }

    pub fn start_scan(&self) {
        let entry = self.entry.clone();
        spawn(async move {
            let camera = DeviceCamera::new(SCANNER_VIDEO);
            if let Err(e) = entry.scan(&camera, &SleepTimer).await {
                tracing::debug!(error = %e, "scan ended without a result");
            }
        });
    }
}

pub fn use_panels() -> Panels {
    use_context::<Panels>()
}

type SharedRouter = Rc<RefCell<ViewRouter<NavView>>>;

#[component]
pub fn DashboardView(on_logged_out: EventHandler<()>) -> Element {
    let state = use_context::<PortalState>();
    let toaster = use_toaster();
    let panels = use_context_provider({
        let state = state.clone();
        move || Panels::new(state, toaster)
    });

    let router: SharedRouter = use_hook(|| {
        let mut router = ViewRouter::new(NavView::new());
        let mut map_wanted = panels.emergency_view.map_wanted;
        router.on_first_show(ViewId::Emergency, move || map_wanted.set(true));
        Rc::new(RefCell::new(router))
    });
    let nav = *router.borrow().binding();

    let show = {
        let router = router.clone();
        let panels = panels.clone();
        move |view: ViewId| {
            let switched = router.borrow_mut().show_view(view);
            if switched {
                panels.enter(view);
            }
        }
    };

    use_effect({
        let show = show.clone();
        move || show(ViewId::Dashboard)
    });

    let session = state.session();
    let signed_out = session.is_none();
    use_effect(move || {
        if signed_out {
            on_logged_out.call(());
        }
    });
    let Some(session) = session else {
        return rsx! {};
    };

    let logout = move |_| {
        Auth::new(state.clone()).logout();
        on_logged_out.call(());
    };

    let visible = (nav.visible)();
    let active = (nav.active)();
    let panel_class = move |view: ViewId| {
        if visible == Some(view) {
            "panel"
        } else {
            "panel hidden"
        }
    };

    rsx! {
        div {
            class: "dashboard",
            header {
                class: "dashboard-header",
                span { class: "brand", "EventEase" }
                div {
                    class: "user-chip",
                    span { class: "avatar", "{session.initial()}" }
                    span { class: "user-name", "{session.display_name}" }
                    span { class: "role-badge", "{session.role.label()}" }
                }
                ThemeToggle {}
                button { class: "btn ghost", onclick: logout, "Log out" }
            }

            nav {
                class: "dashboard-nav",
                for view in ViewId::ALL {
                    button {
                        key: "{view.as_str()}",
                        class: if active == Some(view) { "nav-link active" } else { "nav-link" },
                        onclick: {
                            let show = show.clone();
                            move |_| show(view)
                        },
                        "{view.title()}"
                    }
                }
            }

            main {
                class: "dashboard-main",
                section {
                    class: panel_class(ViewId::Dashboard),
                    OverviewPanel {
                        on_open: {
                            let show = show.clone();
                            move |view: ViewId| show(view)
                        },
                    }
                }
                section { class: panel_class(ViewId::Ticket), TicketPanel {} }
                section { class: panel_class(ViewId::Announcements), AnnouncementsPanel {} }
                section { class: panel_class(ViewId::LostFound), LostFoundPanel {} }
                section { class: panel_class(ViewId::Emergency), EmergencyPanel {} }
            }
        }
    }
}

use dioxus::prelude::*;
use portal::{DashboardSummary, ViewId};

use crate::platform::PortalState;

const SHORTCUTS: [(ViewId, &str); 4] = [
    (ViewId::Ticket, "Generate or show your entry pass"),
    (ViewId::Announcements, "Latest updates from the organisers"),
    (ViewId::LostFound, "Report or find lost items"),
    (ViewId::Emergency, "Request medical help"),
];

/// Greeting, quick stats and shortcuts. Re-reads storage on every render.
#[component]
pub fn OverviewPanel(on_open: EventHandler<ViewId>) -> Element {
    let state = use_context::<PortalState>();
    let Some(summary) = DashboardSummary::load(&state) else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "overview",
            div {
                class: "welcome",
                span { class: "avatar large", "{summary.avatar_initial}" }
                div {
                    h2 { "Welcome, {summary.greeting_name}!" }
                    p { class: "muted", "{summary.role_label()}" }
                }
            }

            div {
                class: "stats",
                div {
                    class: "stat",
                    span { class: "stat-label", "Entry Pass" }
                    span { class: "stat-value", "{summary.entry_status()}" }
                }
                div {
                    class: "stat",
                    span { class: "stat-label", "Announcements" }
                    span { class: "stat-value", "{summary.announcements_label()}" }
                }
            }

            div {
                class: "shortcuts",
                for (view, blurb) in SHORTCUTS {
                    button {
                        key: "{view.as_str()}",
                        class: "shortcut-card",
                        onclick: move |_| on_open.call(view),
                        h3 { "{view.title()}" }
                        p { "{blurb}" }
                    }
                }
            }
        }
    }
}

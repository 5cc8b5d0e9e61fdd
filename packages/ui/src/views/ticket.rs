//! Entry pass panel. Attendees issue and show their pass; volunteers scan.

use dioxus::prelude::*;
use portal::{ScanOutcome, QR_CONTAINER};

use super::dashboard::use_panels;
use crate::bindings::TicketMode;
use crate::capabilities::SCANNER_VIDEO;

#[component]
pub fn TicketPanel() -> Element {
    let panels = use_panels();
    let view = panels.entry_view;
    let mut code = use_signal(String::new);

    let mode = (view.mode)();
    let scanning = (view.scanning)();
    let shown = |section: TicketMode, class: &'static str| {
        if mode == section {
            class.to_string()
        } else {
            format!("{class} hidden")
        }
    };

    let issue = {
        let entry = panels.entry.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if entry.issue(&code()).is_ok() {
                code.set(String::new());
            }
        }
    };

    let scan_result = match (view.result)() {
        Some(ScanOutcome::Verified(payload)) => rsx! {
            div {
                class: "scan-result valid",
                h3 { "Valid ticket" }
                p { "{payload.email}" }
                p { "Event code: {payload.code}" }
            }
        },
        Some(ScanOutcome::Invalid { raw }) => rsx! {
            div {
                class: "scan-result invalid",
                h3 { "Invalid ticket" }
                if let Some(raw) = raw {
                    p { class: "muted", "{raw}" }
                }
            }
        },
        None => rsx! {
            p { class: "muted", "Hold the pass in front of the camera..." }
        },
    };

    rsx! {
        h2 { "Entry Pass" }

        form {
            class: shown(TicketMode::Form, "issue-form"),
            onsubmit: issue,
            label { r#for: "event-code", "Event code" }
            input {
                id: "event-code",
                inputmode: "numeric",
                maxlength: 6,
                placeholder: "6-digit code",
                value: "{code}",
                oninput: move |evt| code.set(evt.value()),
            }
            button { class: "btn primary", r#type: "submit", "Generate Pass" }
        }

        // The QR container stays in the DOM so the widget can draw into it
        // before the card is revealed.
        div {
            class: shown(TicketMode::Pass, "ticket-card"),
            if let Some(pass) = (view.pass)() {
                h3 { "{pass.name}" }
                p { class: "muted", "{pass.email}" }
                p { class: "event-code", "Event code: {pass.event_code}" }
            }
            div { id: QR_CONTAINER, class: "qr" }
        }

        div {
            class: shown(TicketMode::Scanner, "scanner"),
            video {
                id: SCANNER_VIDEO,
                autoplay: true,
                muted: true,
                playsinline: true,
            }
            if let Some(message) = (view.error)() {
                p { class: "form-error", "{message}" }
            }
            {scan_result}
            button {
                class: "btn",
                disabled: scanning,
                onclick: move |_| panels.start_scan(),
                if scanning { "Scanning..." } else { "Scan again" }
            }
        }
    }
}

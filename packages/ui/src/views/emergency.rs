//! Medical SOS. Attendees raise a request; volunteers see and answer them.

use dioxus::prelude::*;
use portal::MAP_CONTAINER;

use super::dashboard::use_panels;
use crate::capabilities::DeviceGeolocation;

#[component]
pub fn EmergencyPanel() -> Element {
    let panels = use_panels();
    let view = panels.emergency_view;
    let controller = panels.emergency.clone();

    // The map needs a laid-out container, so it is created after the first
    // render in which the panel is visible.
    use_effect({
        let controller = controller.clone();
        move || {
            if (view.map_wanted)() {
                let _ = controller.init_map();
            }
        }
    });

    let raise = {
        let controller = controller.clone();
        let geocoder = panels.geocoder.clone();
        move |_| {
            let controller = controller.clone();
            let geocoder = geocoder.clone();
            spawn(async move {
                let _ = controller.raise(&DeviceGeolocation, &geocoder).await;
            });
        }
    };

    let volunteer = (view.volunteer)();

    rsx! {
        h2 { "Medical SOS" }

        if volunteer {
            div {
                class: "sos-requests",
                h3 { "Active requests" }
                if (view.requests)().is_empty() {
                    p { class: "empty-state", "No active emergency requests" }
                }
                for request in (view.requests)() {
                    div {
                        key: "{request.id}",
                        class: "sos-request",
                        div {
                            strong { "{request.user_name}" }
                            p { class: "muted", "{request.location}" }
                            p {
                                class: "muted",
                                {request.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S").to_string()}
                            }
                        }
                        button {
                            class: "btn primary small",
                            onclick: {
                                let controller = controller.clone();
                                let id = request.id.clone();
                                move |_| {
                                    let _ = controller.respond(&id);
                                }
                            },
                            "Respond"
                        }
                    }
                }
            }
        } else {
            div {
                class: "sos-card",
                p { "Need medical help? Press the button and nearby volunteers will see where you are." }
                button {
                    class: "btn sos",
                    disabled: !(view.sos_enabled)(),
                    onclick: raise,
                    "SOS"
                }
                if let Some(status) = (view.status)() {
                    p {
                        class: if status.is_error() { "sos-status error" } else { "sos-status" },
                        "{status.message()}"
                    }
                }
                if let Some(report) = (view.report)() {
                    div {
                        class: "location-report",
                        p { "Location: {report.coordinates()}" }
                        if let Some(accuracy) = report.accuracy_text() {
                            p { "Accuracy: {accuracy}" }
                        }
                        p {
                            "Reported at "
                            {report.reported_at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string()}
                        }
                        if let Some(address) = (view.address)() {
                            p { "Address: {address}" }
                        }
                    }
                }
            }
        }

        div { id: MAP_CONTAINER, class: "map" }
    }
}

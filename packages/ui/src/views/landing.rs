use dioxus::prelude::*;

use crate::theme::ThemeToggle;

#[component]
pub fn LandingView(on_login: EventHandler<()>, on_signup: EventHandler<()>) -> Element {
    rsx! {
        header {
            class: "landing-header",
            span { class: "brand", "EventEase" }
            ThemeToggle {}
        }
        main {
            class: "landing",
            h1 { "Your event, in your pocket" }
            p {
                "Entry passes, live announcements, lost & found and medical help in one place."
            }
            div {
                class: "landing-actions",
                button { class: "btn primary", onclick: move |_| on_signup.call(()), "Get started" }
                button { class: "btn ghost", onclick: move |_| on_login.call(()), "Log in" }
            }
        }
    }
}

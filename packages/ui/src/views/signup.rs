use dioxus::prelude::*;
use portal::{Auth, SignupRequest};

use crate::platform::PortalState;

/// Attendee signup. Volunteers are provisioned through configuration.
#[component]
pub fn SignupView(on_signed_up: EventHandler<()>, on_login: EventHandler<()>) -> Element {
    let state = use_context::<PortalState>();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut agreed = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = SignupRequest {
            name: name(),
            email: email(),
            password: password(),
            accepted_terms: agreed(),
        };
        match Auth::new(state.clone()).signup(&request) {
            Ok(_) => on_signed_up.call(()),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: onsubmit,
                h1 { "Create your account" }

                label { r#for: "name", "Full name" }
                input {
                    id: "name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                label {
                    class: "terms",
                    input {
                        r#type: "checkbox",
                        checked: agreed(),
                        onchange: move |evt| agreed.set(evt.checked()),
                    }
                    "I agree to the Terms of Service and Privacy Policy"
                }

                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }

                button { class: "btn primary", r#type: "submit", "Sign up" }
                p {
                    class: "auth-switch",
                    "Already registered? "
                    a { onclick: move |_| on_login.call(()), "Log in" }
                }
            }
        }
    }
}

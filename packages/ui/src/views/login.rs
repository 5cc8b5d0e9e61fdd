//! Login page: attendee or volunteer.

use dioxus::prelude::*;
use portal::{Auth, AuthError, LoginRequest};
use store::Role;

use crate::capabilities::alert;
use crate::platform::PortalState;

#[component]
pub fn LoginView(on_logged_in: EventHandler<()>, on_signup: EventHandler<()>) -> Element {
    let state = use_context::<PortalState>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(Role::default);
    let mut access_code = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    // Already logged in: skip the form.
    let logged_in = state.session().is_some();
    use_effect(move || {
        if logged_in {
            on_logged_in.call(());
        }
    });

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = LoginRequest {
            email: email(),
            password: password(),
            role: role(),
            access_code: role().is_volunteer().then(|| access_code()),
        };
        match Auth::new(state.clone()).login(&request) {
            Ok(_) => on_logged_in.call(()),
            Err(AuthError::Validation(e)) => error.set(Some(e.to_string())),
            Err(e) => {
                alert(&e.to_string());
                error.set(Some(e.to_string()));
            }
        }
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: onsubmit,
                h1 { "Welcome back" }
                p { class: "auth-subtitle", "Log in to your EventEase account" }

                div {
                    class: "role-switch",
                    for choice in [Role::User, Role::Volunteer] {
                        button {
                            key: "{choice.as_str()}",
                            r#type: "button",
                            class: if role() == choice { "role-option active" } else { "role-option" },
                            onclick: move |_| role.set(choice),
                            "{choice.label()}"
                        }
                    }
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
                if role().is_volunteer() {
                    label { r#for: "access-code", "Volunteer access code" }
                    input {
                        id: "access-code",
                        r#type: "password",
                        value: "{access_code}",
                        oninput: move |evt| access_code.set(evt.value()),
                    }
                }

                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }

                button { class: "btn primary", r#type: "submit", "Log in" }
                p {
                    class: "auth-switch",
                    "New here? "
                    a { onclick: move |_| on_signup.call(()), "Create an account" }
                }
            }
        }
    }
}

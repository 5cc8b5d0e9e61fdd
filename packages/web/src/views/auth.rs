//! Login and signup routes.

use dioxus::prelude::*;
use ui::views::{LoginView, SignupView};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();
    rsx! {
        LoginView {
            on_logged_in: move |_| {
                nav.replace(Route::Dashboard {});
            },
            on_signup: move |_| {
                nav.push(Route::Signup {});
            },
        }
    }
}

/// A successful signup also starts the session.
#[component]
pub fn Signup() -> Element {
    let nav = use_navigator();
    rsx! {
        SignupView {
            on_signed_up: move |_| {
                nav.replace(Route::Dashboard {});
            },
            on_login: move |_| {
                nav.push(Route::Login {});
            },
        }
    }
}

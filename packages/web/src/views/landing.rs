use dioxus::prelude::*;
use ui::views::LandingView;

use crate::Route;

#[component]
pub fn Landing() -> Element {
    let nav = use_navigator();
    rsx! {
        LandingView {
            on_login: move |_| {
                nav.push(Route::Login {});
            },
            on_signup: move |_| {
                nav.push(Route::Signup {});
            },
        }
    }
}

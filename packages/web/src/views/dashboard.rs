use dioxus::prelude::*;
use ui::views::DashboardView;

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();
    rsx! {
        DashboardView {
            on_logged_out: move |_| {
                nav.replace(Route::Login {});
            },
        }
    }
}

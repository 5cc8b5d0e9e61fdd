use dioxus::prelude::*;
use store::PortalConfig;
use tracing::warn;

use ui::{apply_theme, make_state, ToastProvider};
use views::{Dashboard, Landing, Login, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Landing {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[route("/dashboard")]
    Dashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const QRCODE_JS: &str = "https://cdn.jsdelivr.net/npm/qrcodejs@1.0.0/qrcode.min.js";

const PORTAL_TOML: &str = include_str!("../portal.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

fn load_config() -> PortalConfig {
    PortalConfig::from_toml(PORTAL_TOML).unwrap_or_else(|e| {
        warn!(error = %e, file = PortalConfig::filename(), "invalid config, using defaults");
        PortalConfig::default()
    })
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);
    let state = use_context_provider(|| make_state(config.clone()));
    use_hook(|| apply_theme(state.store().theme()));

    rsx! {
        document::Stylesheet { href: LEAFLET_CSS }
        document::Stylesheet { href: MAIN_CSS }
        document::Script { src: LEAFLET_JS }
        document::Script { src: QRCODE_JS }

        ToastProvider {
            duration_ms: config.toast.duration_ms,
            Router::<Route> {}
        }
    }
}

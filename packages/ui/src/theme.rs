use dioxus::prelude::*;
use store::ThemePreference;

use crate::platform::PortalState;

/// Set `data-theme` on the document element.
pub fn apply_theme(theme: ThemePreference) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(theme = theme.as_str(), "theme applied");
    }
}

/// Light/dark switch. Applies the stored preference on mount.
#[component]
pub fn ThemeToggle() -> Element {
    let state = use_context::<PortalState>();
    let mut theme = use_signal(|| state.store().theme());

    use_effect(move || apply_theme(theme()));

    let label = match theme() {
        ThemePreference::Light => "\u{1F319}",
        ThemePreference::Dark => "\u{2600}\u{FE0F}",
    };

    rsx! {
        button {
            class: "theme-toggle",
            title: "Toggle theme",
            onclick: move |_| theme.set(state.store().toggle_theme()),
            "{label}"
        }
    }
}

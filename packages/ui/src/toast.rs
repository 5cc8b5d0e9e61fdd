use dioxus::prelude::*;
use portal::capability::Timer;
use portal::{Notify, ToastLevel};
use std::time::Duration;

use crate::capabilities::SleepTimer;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Handle for pushing transient notifications. Cheap to copy into closures.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
    duration_ms: u64,
}

impl Toaster {
    pub fn show(&self, level: ToastLevel, message: &str) {
        let mut toasts = self.toasts;
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);
        toasts.write().push(Toast {
            id,
            level,
            message: message.to_string(),
        });

        let duration = Duration::from_millis(self.duration_ms);
        spawn(async move {
            SleepTimer.sleep(duration).await;
            toasts.write().retain(|t| t.id != id);
        });
    }
}

impl Notify for Toaster {
    fn toast(&self, level: ToastLevel, message: &str) {
        self.show(level, message);
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>()
}

/// Provides a [`Toaster`] to its children and renders the toast stack.
#[component]
pub fn ToastProvider(duration_ms: u64, children: Element) -> Element {
    let toasts = use_signal(Vec::<Toast>::new);
    let next_id = use_signal(|| 0u64);
    use_context_provider(|| Toaster {
        toasts,
        next_id,
        duration_ms,
    });

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for toast in toasts() {
                div {
                    key: "{toast.id}",
                    class: "toast toast-{toast.level.as_str()}",
                    role: "status",
                    "{toast.message}"
                }
            }
        }
    }
}

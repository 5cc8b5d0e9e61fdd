//! Lost & found chat board.

use std::sync::Arc;

use dioxus::html::FileEngine;
use dioxus::prelude::*;

use super::dashboard::use_panels;
use crate::capabilities::FileAttachment;

const CHAT_BOX: &str = "chatBox";
const CHAT_FILE: &str = "chat-file";

#[component]
pub fn LostFoundPanel() -> Element {
    let panels = use_panels();
    let view = panels.chat_view;
    let chat = panels.chat;

    let mut sender = use_signal(String::new);
    let mut picked = use_signal(|| Option::<Arc<dyn FileEngine>>::None);
    let mut draft = view.draft;

    // Scroll after the new message list has been rendered.
    use_effect(move || {
        let _ticks = (view.scroll_ticks)();
        document::eval(&format!(
            "const box = document.getElementById('{CHAT_BOX}'); \
             if (box) {{ box.scrollTop = box.scrollHeight; }}"
        ));
    });

    // A successful post resets the form, including the picked file.
    use_effect(move || {
        if (view.form_epoch)() > 0 {
            picked.set(None);
            document::eval(&format!(
                "const input = document.getElementById('{CHAT_FILE}'); \
                 if (input) {{ input.value = ''; }}"
            ));
        }
    });

    let send = move |evt: FormEvent| {
        evt.prevent_default();
        let chat = chat.clone();
        let text = draft();
        let name = sender();
        // Kept until the post succeeds so a rejected send can be retried.
        let image = picked().and_then(FileAttachment::first);
        spawn(async move {
            let name = name.trim();
            let sender = (!name.is_empty()).then_some(name);
            if let Err(e) = chat.post_message(sender, &text, image).await {
                tracing::debug!(error = %e, "chat message not posted");
            }
        });
    };

    let self_name = (view.self_name)();
    let sending = (view.sending)();

    rsx! {
        h2 { "Lost & Found" }
        p { class: "muted", "Lost something, or found something? Tell everyone here." }

        div {
            id: CHAT_BOX,
            class: "chat-box",
            for (i, msg) in (view.messages)().into_iter().enumerate() {
                div {
                    key: "{i}",
                    class: if self_name.as_deref() == Some(msg.sender.as_str()) { "chat-message own" } else { "chat-message" },
                    span { class: "avatar", "{msg.sender_initial()}" }
                    div {
                        class: "chat-bubble",
                        div {
                            class: "chat-meta",
                            strong { "{msg.sender}" }
                            span {
                                class: "muted",
                                {msg.time_label(&chrono::Local)}
                            }
                        }
                        p { "{msg.text}" }
                        if let Some(src) = msg.image.clone() {
                            img { class: "chat-image", src: "{src}", alt: "Attached image" }
                        }
                    }
                }
            }
        }

        form {
            class: "chat-form",
            onsubmit: send,
            input {
                placeholder: "Your name (optional)",
                value: "{sender}",
                oninput: move |evt| sender.set(evt.value()),
            }
            textarea {
                placeholder: "Describe the item and where it was lost or found",
                value: "{draft}",
                oninput: move |evt| draft.set(evt.value()),
            }
            input {
                id: CHAT_FILE,
                r#type: "file",
                accept: "image/*",
                onchange: move |evt: FormEvent| picked.set(evt.files()),
            }
            button {
                class: "btn primary",
                r#type: "submit",
                disabled: sending,
                if sending { "Sending..." } else { "Send" }
            }
        }
    }
}

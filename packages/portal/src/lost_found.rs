//! Lost-and-found chat: an append-only message log in durable storage.
//!
//! A message with an attached image is appended only once the image has been
//! read into a `data:` URL. The log is re-read from storage after the read
//! completes so a message posted meanwhile in another tab is not dropped.
//! A log that cannot be parsed is never written over.

use store::{ChatMessage, KeyValueStore};
use tracing::{info, warn};

use crate::capability::ImageSource;
use crate::error::{PostError, ValidationError};
use crate::notify::{Notify, ToastLevel};
use crate::state::AppState;

const ANONYMOUS: &str = "Anonymous";

pub trait ChatBinding: Notify {
    /// `self_name` marks which messages were sent by the viewer.
    fn render_messages(&self, messages: &[ChatMessage], self_name: Option<&str>);
    fn scroll_to_latest(&self);
    /// Disable the send control while an attachment is being read.
    fn set_sending(&self, sending: bool);
    fn reset_form(&self);
}

pub struct LostFoundController<S: KeyValueStore, V: ChatBinding> {
    state: AppState<S>,
    view: V,
}

impl<S: KeyValueStore, V: ChatBinding> LostFoundController<S, V> {
    pub fn new(state: AppState<S>, view: V) -> Self {
        Self { state, view }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state.store().chat_messages()
    }

    pub fn enter(&self) {
        self.render(&self.messages());
    }

    fn render(&self, messages: &[ChatMessage]) {
        let self_name = self.state.session().map(|s| s.display_name);
        self.view.render_messages(messages, self_name.as_deref());
        self.view.scroll_to_latest();
    }

    /// Trimmed override, then the session's display name, then "Anonymous".
    pub fn resolve_sender(&self, sender_override: Option<&str>) -> String {
        sender_override
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.state.session().map(|s| s.display_name))
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }

    pub async fn post_message<I: ImageSource>(
        &self,
        sender_override: Option<&str>,
        text: &str,
        image: Option<I>,
    ) -> Result<ChatMessage, PostError> {
        let text = text.trim();
        if text.is_empty() {
            // The attachment is left unread and the form untouched.
            let err = if image.is_some() {
                ValidationError::ImageWithoutText
            } else {
                ValidationError::EmptyMessage
            };
            self.view.toast(ToastLevel::Warning, &err.to_string());
            return Err(err.into());
        }

        let sender = self.resolve_sender(sender_override);
        let timestamp = self.state.now();

        let image = match image {
            Some(source) => {
                self.view.set_sending(true);
                let read = source.read_data_url().await;
                self.view.set_sending(false);
                match read {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!(error = %e, "chat attachment unreadable");
                        let err = PostError::from(e);
                        self.view.toast(ToastLevel::Error, &err.to_string());
                        return Err(err);
                    }
                }
            }
            None => None,
        };

        let message = ChatMessage {
            sender,
            text: text.to_string(),
            image,
            timestamp: Some(timestamp),
            time: None,
        };
        let store = self.state.store();
        let mut messages = store.chat_messages();
        messages.push(message.clone());
        if let Err(e) = store.save_chat_messages(&messages) {
            warn!(error = %e, "chat message not saved");
            self.view.toast(ToastLevel::Error, &e.to_string());
            return Err(e.into());
        }
        info!(
            sender = %message.sender,
            with_image = message.image.is_some(),
            "lost-and-found message posted"
        );

        self.render(&messages);
        self.view.reset_form();
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use store::{MemoryStore, Role};

    use super::*;
    use crate::capability::NoAttachment;
    use crate::error::CapabilityError;
    use crate::testing::{self, BrokenImage, RecordingImage, RecordingView};

    fn controller(role: Option<Role>) -> (LostFoundController<MemoryStore, RecordingView>, RecordingView) {
        let state = testing::state();
        if let Some(role) = role {
            testing::log_in(&state, "asha", role);
        }
        let view = RecordingView::new();
        (LostFoundController::new(state, view.clone()), view)
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_change() {
        let (ctl, view) = controller(Some(Role::User));
        ctl.post_message(None, "first", None::<NoAttachment>).await.unwrap();

        for text in ["", "   \n"] {
            let err = ctl.post_message(None, text, None::<NoAttachment>).await.unwrap_err();
            assert_eq!(err, PostError::Validation(ValidationError::EmptyMessage));
        }
        assert_eq!(ctl.messages().len(), 1);
        assert_eq!(view.last_toast().unwrap().0, ToastLevel::Warning);
    }

    #[tokio::test]
    async fn test_image_without_text_is_kept_unread() {
        let (ctl, view) = controller(Some(Role::User));
        let seen = Rc::new(Cell::new(None));
        let image = RecordingImage {
            url: "data:image/png;base64,iVBORw0KGgo=",
            store: ctl.state.store().clone(),
            seen_during_read: seen.clone(),
        };

        let err = ctl.post_message(None, "  ", Some(image)).await.unwrap_err();
        assert_eq!(err, PostError::Validation(ValidationError::ImageWithoutText));
        assert_eq!(seen.get(), None);
        assert!(ctl.messages().is_empty());

        let log = view.log.borrow();
        assert!(log.sending.is_empty());
        assert_eq!(log.resets, 0);
        assert_eq!(
            log.toasts.last().unwrap(),
            &(
                ToastLevel::Warning,
                "Please add a description for the attached image.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_legacy_log_survives_a_new_post() {
        let durable = MemoryStore::new();
        durable.set(
            store::keys::CHAT_MESSAGES,
            r#"[{"name":"Ana","text":"Lost my badge","time":"10:30","image":null}]"#,
        );
        let ctl = LostFoundController::new(testing::state_on(durable), RecordingView::new());

        ctl.post_message(Some("Ben"), "Badge is at the desk", None::<NoAttachment>)
            .await
            .unwrap();

        let stored = ctl.messages();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].sender, "Ana");
        assert_eq!(stored[0].time.as_deref(), Some("10:30"));
        assert_eq!(stored[1].sender, "Ben");
        assert!(stored[1].timestamp.is_some());
    }

    #[tokio::test]
    async fn test_unreadable_log_is_not_overwritten() {
        let durable = MemoryStore::new();
        durable.set(store::keys::CHAT_MESSAGES, "not a list");
        let view = RecordingView::new();
        let ctl = LostFoundController::new(testing::state_on(durable.clone()), view.clone());

        let err = ctl
            .post_message(None, "lost keys", None::<NoAttachment>)
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::Storage(_)));
        assert_eq!(
            durable.get(store::keys::CHAT_MESSAGES).as_deref(),
            Some("not a list")
        );
        assert_eq!(view.last_toast().unwrap().0, ToastLevel::Error);
        assert_eq!(view.log.borrow().resets, 0);
    }

    #[tokio::test]
    async fn test_image_is_appended_after_read_completes() {
        let (ctl, view) = controller(Some(Role::User));
        let seen = Rc::new(Cell::new(None));
        let image = RecordingImage {
            url: "data:image/png;base64,iVBORw0KGgo=",
            store: ctl.state.store().clone(),
            seen_during_read: seen.clone(),
        };

        let message = ctl
            .post_message(None, "Found a blue umbrella", Some(image))
            .await
            .unwrap();

        assert_eq!(seen.get(), Some(0));
        let stored = ctl.messages();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], message);
        assert_eq!(
            message.image.as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );

        let log = view.log.borrow();
        assert_eq!(log.sending, vec![true, false]);
        assert_eq!(log.resets, 1);
        assert_eq!(log.messages.len(), 1);
        assert!(log.scrolls >= 1);
    }

    #[tokio::test]
    async fn test_unreadable_image_appends_nothing() {
        let (ctl, view) = controller(Some(Role::User));
        let err = ctl
            .post_message(None, "lost keys", Some(BrokenImage))
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::Attachment(CapabilityError::Failed(_))));
        assert!(ctl.messages().is_empty());
        assert_eq!(view.log.borrow().sending, vec![true, false]);
        assert_eq!(view.log.borrow().resets, 0);
    }

    #[tokio::test]
    async fn test_sender_resolution() {
        let (ctl, view) = controller(Some(Role::User));
        let named = ctl
            .post_message(Some("  Desk 3 "), "wallet", None::<NoAttachment>)
            .await
            .unwrap();
        assert_eq!(named.sender, "Desk 3");

        let own = ctl
            .post_message(Some("  "), "phone", None::<NoAttachment>)
            .await
            .unwrap();
        assert_eq!(own.sender, "asha");
        assert_eq!(view.log.borrow().self_name.as_deref(), Some("asha"));

        let (anon, _) = controller(None);
        let msg = anon
            .post_message(None, "scarf", None::<NoAttachment>)
            .await
            .unwrap();
        assert_eq!(msg.sender, "Anonymous");
    }

    #[tokio::test]
    async fn test_messages_append_in_order_and_scroll() {
        let (ctl, view) = controller(Some(Role::User));
        for text in ["one", "two", "three"] {
            ctl.post_message(None, text, None::<NoAttachment>).await.unwrap();
        }
        let texts: Vec<_> = ctl.messages().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, ["one", "two", "three"]);
        assert_eq!(view.log.borrow().scrolls, 3);
        assert!(view.log.borrow().sending.is_empty());
    }
}

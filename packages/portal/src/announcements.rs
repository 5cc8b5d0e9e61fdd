//! # Announcements board
//!
//! Volunteers post and delete announcements; everyone reads them, newest
//! first, optionally filtered by priority. The collection lives in durable
//! storage, so every tab on the origin shares it (last write wins).
//!
//! Volunteer checks here decide what the UI offers. They are not an access
//! control boundary.

use std::cell::Cell;

use store::{Announcement, KeyValueStore, Priority, PriorityFilter};
use tracing::{info, warn};

use crate::error::{BoardError, ValidationError};
use crate::notify::{Notify, ToastLevel};
use crate::state::AppState;

const DEFAULT_AUTHOR: &str = "Volunteer";

pub trait AnnouncementsBinding: Notify {
    fn set_composer_visible(&self, visible: bool);
    fn render_announcements(&self, items: &[Announcement], filter: PriorityFilter, can_delete: bool);
    /// Shown instead of an empty list.
    fn render_empty(&self, filter: PriorityFilter, message: &str);
}

pub fn empty_message(filter: PriorityFilter) -> String {
    match filter {
        PriorityFilter::All => "No announcements yet".to_string(),
        PriorityFilter::Only(p) => format!("No {p} announcements"),
    }
}

pub struct AnnouncementsController<S: KeyValueStore, V: AnnouncementsBinding> {
    state: AppState<S>,
    view: V,
    filter: Cell<PriorityFilter>,
}

impl<S: KeyValueStore, V: AnnouncementsBinding> AnnouncementsController<S, V> {
    pub fn new(state: AppState<S>, view: V) -> Self {
        Self {
            state,
            view,
            filter: Cell::new(PriorityFilter::All),
        }
    }

    fn is_volunteer(&self) -> bool {
        self.state
            .session()
            .is_some_and(|s| s.role.is_volunteer())
    }

    fn require_volunteer(&self) -> Result<String, ValidationError> {
        let session = self.state.session().ok_or(ValidationError::SessionRequired)?;
        if !session.role.is_volunteer() {
            return Err(ValidationError::VolunteerOnly);
        }
        Ok(session.display_name)
    }

    pub fn filter(&self) -> PriorityFilter {
        self.filter.get()
    }

    pub fn enter(&self) {
        self.view.set_composer_visible(self.is_volunteer());
        self.show(self.filter.get());
    }

    /// Announcements matching `filter`, newest first. Equal timestamps keep
    /// their stored order.
    pub fn list(&self, filter: PriorityFilter) -> Vec<Announcement> {
        let mut items: Vec<_> = self
            .state
            .store()
            .announcements()
            .into_iter()
            .filter(|a| filter.matches(a))
            .collect();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items
    }

    pub fn show(&self, filter: PriorityFilter) {
        self.filter.set(filter);
        let items = self.list(filter);
        if items.is_empty() {
            self.view.render_empty(filter, &empty_message(filter));
        } else {
            self.view
                .render_announcements(&items, filter, self.is_volunteer());
        }
    }

    pub fn create(
        &self,
        title: &str,
        content: &str,
        priority: Priority,
    ) -> Result<Announcement, BoardError> {
        let result = self.try_create(title, content, priority);
        match &result {
            Ok(a) => {
                info!(id = %a.id, priority = a.priority.as_str(), "announcement posted");
                self.show(PriorityFilter::All);
                self.view
                    .toast(ToastLevel::Success, "Announcement posted successfully!");
            }
            Err(e) => {
                warn!(error = %e, "announcement rejected");
                self.view.toast(e.toast_level(), &e.to_string());
            }
        }
        result
    }

    fn try_create(
        &self,
        title: &str,
        content: &str,
        priority: Priority,
    ) -> Result<Announcement, BoardError> {
        let author = self.require_volunteer()?;
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }
        if content.is_empty() {
            return Err(ValidationError::MissingField("content").into());
        }

        let store = self.state.store();
        let mut items = store.announcements();
        let timestamp = self.state.now();
        let base = format!("announcement-{}", timestamp.timestamp_millis());
        let mut id = base.clone();
        let mut n = 1;
        while items.iter().any(|a| a.id == id) {
            id = format!("{base}-{n}");
            n += 1;
        }

        let announcement = Announcement {
            id,
            title: title.to_string(),
            content: content.to_string(),
            priority,
            timestamp,
            author: if author.is_empty() {
                DEFAULT_AUTHOR.to_string()
            } else {
                author
            },
        };
        items.insert(0, announcement.clone());
        store.save_announcements(&items)?;
        Ok(announcement)
    }

    /// Remove the announcement with `id`. `Ok(false)` when there is none;
    /// nothing is written in that case.
    pub fn delete(&self, id: &str) -> Result<bool, BoardError> {
        if let Err(e) = self.require_volunteer() {
            warn!(error = %e, "announcement delete rejected");
            self.view.toast(ToastLevel::Warning, &e.to_string());
            return Err(e.into());
        }

        let store = self.state.store();
        let mut items = store.announcements();
        let Some(index) = items.iter().position(|a| a.id == id) else {
            return Ok(false);
        };
        items.remove(index);
        if let Err(e) = store.save_announcements(&items) {
            warn!(error = %e, "announcement delete not saved");
            self.view.toast(ToastLevel::Error, &e.to_string());
            return Err(e.into());
        }
        info!(id, "announcement deleted");
        self.show(PriorityFilter::All);
        self.view
            .toast(ToastLevel::Success, "Announcement deleted successfully!");
        Ok(true)
    }
}

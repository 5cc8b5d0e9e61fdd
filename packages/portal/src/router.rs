//! Dashboard view switching.
//!
//! [`ViewRouter`] owns the "which panel is visible" decision for the dashboard.
//! At most one panel is visible at a time and the matching navigation control
//! is the only active one. A view may register a hook that runs the first time
//! it is shown (the emergency map is created this way).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewId {
    #[default]
    Dashboard,
    Ticket,
    Announcements,
    LostFound,
    Emergency,
}

impl ViewId {
    pub const ALL: [ViewId; 5] = [
        ViewId::Dashboard,
        ViewId::Ticket,
        ViewId::Announcements,
        ViewId::LostFound,
        ViewId::Emergency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewId::Dashboard => "dashboard",
            ViewId::Ticket => "ticket",
            ViewId::Announcements => "announcements",
            ViewId::LostFound => "lostfound",
            ViewId::Emergency => "emergency",
        }
    }

    /// Navigation label.
    pub fn title(self) -> &'static str {
        match self {
            ViewId::Dashboard => "Overview",
            ViewId::Ticket => "Entry Pass",
            ViewId::Announcements => "Announcements",
            ViewId::LostFound => "Lost & Found",
            ViewId::Emergency => "Medical SOS",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown view: {0:?}")]
pub struct UnknownView(pub String);

impl FromStr for ViewId {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// What the router needs from the page: panel visibility and nav highlighting.
pub trait NavBinding {
    fn set_panel_visible(&self, view: ViewId, visible: bool);
    fn set_nav_active(&self, view: ViewId, active: bool);
}

pub struct ViewRouter<B: NavBinding> {
    binding: B,
    views: Vec<ViewId>,
    active: Option<ViewId>,
    first_show: HashMap<ViewId, Box<dyn FnOnce()>>,
}

impl<B: NavBinding> ViewRouter<B> {
    /// A router over every dashboard view.
    pub fn new(binding: B) -> Self {
        Self::with_views(binding, ViewId::ALL.to_vec())
    }

    pub fn with_views(binding: B, views: Vec<ViewId>) -> Self {
        Self {
            binding,
            views,
            active: None,
            first_show: HashMap::new(),
        }
    }

    pub fn active(&self) -> Option<ViewId> {
        self.active
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    /// Run `init` the first time `view` is shown. Replaces an earlier hook for
    /// the same view that has not fired yet.
    pub fn on_first_show(&mut self, view: ViewId, init: impl FnOnce() + 'static) {
        self.first_show.insert(view, Box::new(init));
    }

    /// Show `view` and hide every other registered view.
    ///
    /// Returns `false` without touching the page when `view` is already
    /// showing or is not registered.
    pub fn show_view(&mut self, view: ViewId) -> bool {
        if self.active == Some(view) || !self.views.contains(&view) {
            return false;
        }

        for &other in &self.views {
            let visible = other == view;
            self.binding.set_panel_visible(other, visible);
            self.binding.set_nav_active(other, visible);
        }
        self.active = Some(view);
        debug!(view = view.as_str(), "switched view");

        if let Some(init) = self.first_show.remove(&view) {
            debug!(view = view.as_str(), "running first-show hook");
            init();
        }
        true
    }

    pub fn show_view_str(&mut self, view: &str) -> Result<bool, UnknownView> {
        Ok(self.show_view(view.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::testing::RecordingView;

    #[test]
    fn test_exactly_one_view_visible() {
        let view = RecordingView::new();
        let mut router = ViewRouter::new(view.clone());

        for target in [ViewId::Ticket, ViewId::Emergency, ViewId::Dashboard] {
            assert!(router.show_view(target));
            let log = view.log.borrow();
            let visible: Vec<_> = log.panels.iter().filter(|(_, v)| **v).collect();
            assert_eq!(visible, vec![(&target, &true)]);
            let active: Vec<_> = log.nav.iter().filter(|(_, v)| **v).collect();
            assert_eq!(active, vec![(&target, &true)]);
        }
    }

    #[test]
    fn test_show_view_is_idempotent() {
        let view = RecordingView::new();
        let mut router = ViewRouter::new(view.clone());

        assert!(router.show_view(ViewId::Announcements));
        let writes = view.log.borrow().panel_writes;
        assert!(!router.show_view(ViewId::Announcements));
        assert!(!router.show_view(ViewId::Announcements));
        assert_eq!(view.log.borrow().panel_writes, writes);
        assert_eq!(router.active(), Some(ViewId::Announcements));
    }

    #[test]
    fn test_first_show_hook_runs_once() {
        let mut router = ViewRouter::new(RecordingView::new());
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        router.on_first_show(ViewId::Emergency, move || counter.set(counter.get() + 1));

        router.show_view(ViewId::Dashboard);
        assert_eq!(runs.get(), 0);
        router.show_view(ViewId::Emergency);
        router.show_view(ViewId::Dashboard);
        router.show_view(ViewId::Emergency);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_unregistered_and_unknown_views() {
        let view = RecordingView::new();
        let mut router = ViewRouter::with_views(view.clone(), vec![ViewId::Dashboard]);

        assert!(!router.show_view(ViewId::Emergency));
        assert_eq!(view.log.borrow().panel_writes, 0);
        assert_eq!(
            router.show_view_str("lobby"),
            Err(UnknownView("lobby".to_string()))
        );
        assert_eq!(router.show_view_str("dashboard"), Ok(true));
    }

    #[test]
    fn test_view_id_round_trips_through_str() {
        for v in ViewId::ALL {
            assert_eq!(v.as_str().parse::<ViewId>(), Ok(v));
        }
    }
}

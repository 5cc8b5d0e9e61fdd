use store::{KeyValueStore, Role};

use crate::state::AppState;

/// Quick stats at the top of the dashboard overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardSummary {
    pub greeting_name: String,
    pub role: Role,
    pub avatar_initial: String,
    pub has_entry_pass: bool,
    pub announcement_count: usize,
}

impl DashboardSummary {
    /// `None` when nobody is logged in.
    pub fn load<S: KeyValueStore>(state: &AppState<S>) -> Option<Self> {
        let session = state.session()?;
        let store = state.store();
        Some(Self {
            avatar_initial: session.initial(),
            has_entry_pass: store.entry_pass(&session.email).is_some(),
            announcement_count: store.announcements().len(),
            role: session.role,
            greeting_name: session.display_name,
        })
    }

    pub fn role_label(&self) -> &'static str {
        self.role.label()
    }

    pub fn entry_status(&self) -> &'static str {
        if self.has_entry_pass {
            "Generated"
        } else {
            "Not Generated"
        }
    }

    pub fn announcements_label(&self) -> String {
        match self.announcement_count {
            0 => "No New".to_string(),
            n => format!("{n} Available"),
        }
    }
}

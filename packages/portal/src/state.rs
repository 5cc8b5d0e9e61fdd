//! Explicit state holder handed to every controller at construction.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use store::{EmergencyRequest, KeyValueStore, PortalConfig, Session, SessionStore};

use crate::capability::{Clock, SystemClock};

/// Everything the controllers read or mutate: the typed storage, the
/// configuration, the clock, and the in-memory list of active emergencies.
///
/// Cloning is cheap and every clone sees the same state.
#[derive(Clone)]
pub struct AppState<S: KeyValueStore> {
    store: SessionStore<S>,
    config: Rc<PortalConfig>,
    clock: Rc<dyn Clock>,
    emergencies: Rc<RefCell<Vec<EmergencyRequest>>>,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(store: SessionStore<S>, config: PortalConfig) -> Self {
        Self {
            store,
            config: Rc::new(config),
            clock: Rc::new(SystemClock),
            emergencies: Rc::default(),
        }
    }

    /// Replace the wall clock, e.g. with a deterministic one in tests.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn session(&self) -> Option<Session> {
        self.store.session()
    }

    pub fn emergencies(&self) -> Vec<EmergencyRequest> {
        self.emergencies.borrow().clone()
    }

    pub(crate) fn push_emergency(&self, request: EmergencyRequest) {
        self.emergencies.borrow_mut().push(request);
    }

    pub(crate) fn take_emergency(&self, id: &str) -> Option<EmergencyRequest> {
        let mut active = self.emergencies.borrow_mut();
        let index = active.iter().position(|e| e.id == id)?;
        Some(active.remove(index))
    }
}

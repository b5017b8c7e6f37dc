//! Event listener port
//!
//! Collaborators such as loggers and progress displays subscribe to
//! [`OrchestraEvent`]s through this trait.

use orchestra_domain::OrchestraEvent;
use std::sync::{Arc, PoisonError, RwLock};

/// Receives orchestration lifecycle events.
///
/// Called synchronously on the orchestrating task, so implementations should
/// return quickly.
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &OrchestraEvent);
}

/// No-op listener for when events are not needed
pub struct NoEvents;

impl EventListener for NoEvents {
    fn on_event(&self, _event: &OrchestraEvent) {}
}

/// Fan-out of events to every subscribed listener, in subscription order.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
}

impl EventBus {
    pub fn new(listeners: Vec<Arc<dyn EventListener>>) -> Self {
        Self {
            listeners: RwLock::new(listeners),
        }
    }

    pub fn subscribe(&self, listener: Arc<dyn EventListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn publish(&self, event: &OrchestraEvent) {
        // Snapshot so a listener may subscribe others without deadlocking
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener.on_event(event);
        }
    }
}

impl EventListener for EventBus {
    fn on_event(&self, event: &OrchestraEvent) {
        self.publish(event);
    }
}

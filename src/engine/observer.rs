// Observer registration with per-observer mailboxes
//
// Providers never hold references to the components observing them. Each
// observer gets an opaque handle and a mailbox; the owning entity drains the
// mailbox and forwards notifications, and the observer removes its handle
// when it is torn down.

use std::collections::VecDeque;

/// Opaque handle identifying one registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

impl ObserverId {
    /// Raw numeric value (for logging)
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// List of registered observers, each with its own pending notifications
#[derive(Debug)]
pub struct ObserverList<E> {
    observers: Vec<(ObserverId, VecDeque<E>)>,
    next_id: u32,
}

impl<E> Default for ObserverList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ObserverList<E> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a new observer
    pub fn add(&mut self) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, VecDeque::new()));
        id
    }

    /// Remove an observer, dropping anything still pending for it.
    /// Returns false if the handle was not registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    /// Check if a handle is currently registered
    pub fn contains(&self, id: ObserverId) -> bool {
        self.observers.iter().any(|(observer, _)| *observer == id)
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Take every pending notification for one observer, oldest first
    pub fn take(&mut self, id: ObserverId) -> Vec<E> {
        self.observers
            .iter_mut()
            .find(|(observer, _)| *observer == id)
            .map(|(_, mailbox)| mailbox.drain(..).collect())
            .unwrap_or_default()
    }
}

impl<E: Clone> ObserverList<E> {
    /// Deliver a notification to every registered observer
    pub fn notify(&mut self, event: E) {
        for (_, mailbox) in &mut self.observers {
            mailbox.push_back(event.clone());
        }
    }
}

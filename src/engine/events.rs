// Single-threaded event bus
//
// Publishers either trigger an event (delivered to listeners right away) or
// queue it (delivered on the next `dispatch_queued`). Listeners subscribe to
// a set of event kinds and drain their own mailbox.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// An event type that can travel on the bus
pub trait BusEvent: Clone {
    /// Discriminant used for subscription filtering
    type Kind: Copy + PartialEq + std::fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

/// Handle identifying one bus listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

#[derive(Debug)]
struct Listener<E: BusEvent> {
    id: ListenerId,
    /// None listens to everything
    kinds: Option<Vec<E::Kind>>,
    mailbox: VecDeque<E>,
}

impl<E: BusEvent> Listener<E> {
    fn wants(&self, kind: E::Kind) -> bool {
        self.kinds
            .as_ref()
            .map_or(true, |kinds| kinds.contains(&kind))
    }
}

#[derive(Debug)]
struct BusState<E: BusEvent> {
    listeners: Vec<Listener<E>>,
    queued: VecDeque<E>,
    next_id: u32,
}

/// Cheaply cloneable handle to a shared event bus
#[derive(Debug)]
pub struct EventBus<E: BusEvent> {
    state: Rc<RefCell<BusState<E>>>,
}

impl<E: BusEvent> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> EventBus<E> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(BusState {
                listeners: Vec::new(),
                queued: VecDeque::new(),
                next_id: 0,
            })),
        }
    }

    fn add_listener(&self, kinds: Option<Vec<E::Kind>>) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push(Listener {
            id,
            kinds,
            mailbox: VecDeque::new(),
        });
        id
    }

    /// Listen to the given event kinds only
    pub fn subscribe(&self, kinds: &[E::Kind]) -> ListenerId {
        self.add_listener(Some(kinds.to_vec()))
    }

    /// Listen to every event
    pub fn subscribe_all(&self) -> ListenerId {
        self.add_listener(None)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|listener| listener.id != id);
        state.listeners.len() != before
    }

    /// Deliver an event to matching listeners immediately
    pub fn trigger(&self, event: E) {
        let mut state = self.state.borrow_mut();
        let kind = event.kind();
        for listener in state.listeners.iter_mut().filter(|l| l.wants(kind)) {
            listener.mailbox.push_back(event.clone());
        }
    }

    /// Hold an event until the next `dispatch_queued`
    pub fn queue(&self, event: E) {
        self.state.borrow_mut().queued.push_back(event);
    }

    /// Deliver all queued events, returns how many were dispatched.
    /// Events queued while dispatching wait for the next call.
    pub fn dispatch_queued(&self) -> usize {
        let pending: Vec<E> = self.state.borrow_mut().queued.drain(..).collect();
        let count = pending.len();
        for event in pending {
            self.trigger(event);
        }
        count
    }

    /// Number of events waiting for `dispatch_queued`
    pub fn queued_len(&self) -> usize {
        self.state.borrow().queued.len()
    }

    /// Take every event delivered to a listener, oldest first
    pub fn drain(&self, id: ListenerId) -> Vec<E> {
        let mut state = self.state.borrow_mut();
        state
            .listeners
            .iter_mut()
            .find(|listener| listener.id == id)
            .map(|listener| listener.mailbox.drain(..).collect())
            .unwrap_or_default()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Ping {
        Small(u8),
        Large(u32),
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum PingKind {
        Small,
        Large,
    }

    impl BusEvent for Ping {
        type Kind = PingKind;

        fn kind(&self) -> PingKind {
            match self {
                Ping::Small(_) => PingKind::Small,
                Ping::Large(_) => PingKind::Large,
            }
        }
    }

    #[test]
    fn test_trigger_filters_by_kind() {
        let bus = EventBus::new();
        let small = bus.subscribe(&[PingKind::Small]);
        let all = bus.subscribe_all();

        bus.trigger(Ping::Small(1));
        bus.trigger(Ping::Large(2));

        assert_eq!(bus.drain(small), vec![Ping::Small(1)]);
        assert_eq!(bus.drain(all), vec![Ping::Small(1), Ping::Large(2)]);
    }

    #[test]
    fn test_queue_waits_for_dispatch() {
        let bus = EventBus::new();
        let all = bus.subscribe_all();

        bus.queue(Ping::Large(9));
        assert!(bus.drain(all).is_empty());
        assert_eq!(bus.queued_len(), 1);

        assert_eq!(bus.dispatch_queued(), 1);
        assert_eq!(bus.drain(all), vec![Ping::Large(9)]);
        assert_eq!(bus.queued_len(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let all = bus.subscribe_all();
        let clone = bus.clone();

        assert!(clone.unsubscribe(all));
        bus.trigger(Ping::Small(3));
        assert!(bus.drain(all).is_empty());
        assert_eq!(bus.listener_count(), 0);
    }
}

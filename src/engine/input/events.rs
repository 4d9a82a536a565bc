// Raw key events and scoped listener registration

use log::debug;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Whether a key went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    pub fn is_pressed(self) -> bool {
        self == KeyState::Pressed
    }
}

/// A key event as delivered by the platform, before any mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key_code: u32,
    pub state: KeyState,
}

impl RawKeyEvent {
    /// Create a key press event
    pub fn pressed(key_code: u32) -> Self {
        Self {
            key_code,
            state: KeyState::Pressed,
        }
    }

    /// Create a key release event
    pub fn released(key_code: u32) -> Self {
        Self {
            key_code,
            state: KeyState::Released,
        }
    }
}

type Listener = Box<dyn FnMut(&RawKeyEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,

    /// Set while listeners are taken out for a publish
    dispatching: bool,

    /// Subscriptions dropped during a publish
    removed: Vec<u64>,

    /// Events published by a listener, delivered after the current one
    pending: VecDeque<RawKeyEvent>,
}

/// Fan-out point for raw key events
///
/// Single-threaded. Cloning yields another handle to the same listener set.
#[derive(Clone, Default)]
pub struct KeyEventHub {
    registry: Rc<RefCell<Registry>>,
}

impl KeyEventHub {
    /// Create a hub with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener until the returned guard is dropped
    #[must_use = "dropping the subscription detaches the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&RawKeyEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        debug!("Key listener {} attached", id);

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver an event to every listener, in subscription order
    ///
    /// An event published from inside a listener is queued and delivered
    /// once the current event has reached every listener.
    pub fn publish(&self, event: RawKeyEvent) {
        {
            let mut registry = self.registry.borrow_mut();
            if registry.dispatching {
                registry.pending.push_back(event);
                return;
            }
            registry.dispatching = true;
        }

        let mut next = Some(event);
        while let Some(event) = next {
            self.dispatch(&event);
            next = self.registry.borrow_mut().pending.pop_front();
        }

        self.registry.borrow_mut().dispatching = false;
    }

    fn dispatch(&self, event: &RawKeyEvent) {
        // Listeners run without the registry borrowed so they may subscribe
        // or drop subscriptions themselves.
        let mut active = std::mem::take(&mut self.registry.borrow_mut().listeners);

        for (_, listener) in active.iter_mut() {
            listener(event);
        }

        let mut registry = self.registry.borrow_mut();
        let removed = std::mem::take(&mut registry.removed);
        active.retain(|(id, _)| !removed.contains(id));
        active.append(&mut registry.listeners);
        registry.listeners = active;
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps a listener attached to a `KeyEventHub`
///
/// Dropping it detaches the listener.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();

        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        if registry.listeners.len() == before && registry.dispatching {
            registry.removed.push(self.id);
        }
        debug!("Key listener {} detached", self.id);
    }
}

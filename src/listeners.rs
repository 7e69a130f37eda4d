//! Host event listeners with scoped registration.
//!
//! The host pushes [`HostEvent`]s into an [`EventHub`]; components subscribe
//! to it and get back a [`ListenerGuard`]. Dropping or releasing the guard
//! detaches the listener, exactly once, however teardown is triggered.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use glam::Vec2;
use log::debug;

/// An input or viewport signal from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The pointer moved. Normalized coordinates, see [`crate::pointer`].
    PointerMoved(Vec2),
    /// The viewport changed size, in physical pixels.
    Resized { width: u32, height: u32 },
}

type Listener = Rc<RefCell<dyn FnMut(&HostEvent)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Fan-out point for host events. Clones share the same registry.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener` until the returned guard is released.
    #[must_use = "dropping the guard detaches the listener immediately"]
    pub fn subscribe(&self, listener: impl FnMut(&HostEvent) + 'static) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Rc::new(RefCell::new(listener)));
        debug!("Listener {} attached ({} live)", id, registry.listeners.len());

        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            id: Some(id),
        }
    }

    /// Deliver `event` to every attached listener in attach order.
    ///
    /// Listeners may subscribe or release guards while handling an event;
    /// such changes apply from the next dispatch.
    pub fn dispatch(&self, event: &HostEvent) {
        let listeners: Vec<Listener> = self.registry.borrow().listeners.values().cloned().collect();
        for listener in listeners {
            (&mut *listener.borrow_mut())(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps one listener attached to an [`EventHub`] while alive.
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Weak<RefCell<Registry>>,
    id: Option<u64>,
}

impl ListenerGuard {
    /// Detach the listener. Returns `true` only the first time, and only if
    /// the hub still existed to detach from.
    pub fn release(&mut self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = registry.borrow_mut().listeners.remove(&id);
        debug!("Listener {} detached", id);
        removed.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.id.is_some() && self.registry.strong_count() > 0
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_reaches_listeners() {
        let hub = EventHub::new();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let _guard = hub.subscribe(move |_| counter.set(counter.get() + 1));

        hub.dispatch(&HostEvent::PointerMoved(Vec2::ZERO));
        hub.dispatch(&HostEvent::Resized { width: 1, height: 1 });
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_release_detaches_exactly_once() {
        let hub = EventHub::new();
        let mut guard = hub.subscribe(|_| {});
        assert_eq!(hub.listener_count(), 1);
        assert!(guard.is_attached());

        assert!(guard.release());
        assert!(!guard.release());
        assert!(!guard.is_attached());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_drop_detaches() {
        let hub = EventHub::new();
        let seen = Rc::new(Cell::new(false));
        {
            let flag = Rc::clone(&seen);
            let _guard = hub.subscribe(move |_| flag.set(true));
        }
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(&HostEvent::PointerMoved(Vec2::ONE));
        assert!(!seen.get());
    }

    #[test]
    fn test_guard_outliving_hub() {
        let hub = EventHub::new();
        let mut guard = hub.subscribe(|_| {});
        drop(hub);
        assert!(!guard.is_attached());
        assert!(!guard.release());
    }

    #[test]
    fn test_listener_can_release_during_dispatch() {
        let hub = EventHub::new();
        let slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&slot);
        let guard = hub.subscribe(move |_| {
            if let Some(mut guard) = inner.borrow_mut().take() {
                guard.release();
            }
        });
        *slot.borrow_mut() = Some(guard);

        hub.dispatch(&HostEvent::PointerMoved(Vec2::ZERO));
        assert_eq!(hub.listener_count(), 0);
    }
}

//! Typed single-threaded publish/subscribe.
//!
//! Subscribing returns a [`Subscription`]; disposing it (or dropping it)
//! unregisters the handler. Handlers may publish, subscribe or dispose
//! while a dispatch is in progress.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::trace;

type Handler<E> = Rc<dyn Fn(&E)>;

struct Registry<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

impl<E> Registry<E> {
    fn contains(&self, id: u64) -> bool {
        self.handlers.iter().any(|(handler_id, _)| *handler_id == id)
    }
}

/// A channel of events of type `E`. Cloning yields another handle to the
/// same channel.
pub struct EventBus<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<E: 'static> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> Subscription {
        let handler: Handler<E> = Rc::new(handler);
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.push((id, handler));
            id
        };

        let registry: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription {
            dispose: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry
                        .borrow_mut()
                        .handlers
                        .retain(|(handler_id, _)| *handler_id != id);
                }
            })),
        }
    }

    /// Deliver an event to every current subscriber, in subscription order.
    /// Returns the number of handlers invoked.
    pub fn publish(&self, event: &E) -> usize {
        let snapshot: Vec<(u64, Handler<E>)> = self.registry.borrow().handlers.clone();
        let mut delivered = 0;
        for (id, handler) in snapshot {
            // Skip handlers disposed by an earlier handler in this dispatch.
            if !self.registry.borrow().contains(id) {
                continue;
            }
            handler(event);
            delivered += 1;
        }
        trace!("Published event to {} subscribers", delivered);
        delivered
    }
}

impl<E> EventBus<E> {
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

/// Disposer for a registered handler.
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unregister the handler. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }

    pub fn is_active(&self) -> bool {
        self.dispose.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

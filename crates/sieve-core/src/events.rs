//! Minimal synchronous publish/subscribe.
//!
//! The [`EventBus`] decouples the item store from the views that mirror it.
//! Handlers run on the emitting thread, in registration order. A handler that
//! returns an error or panics is logged and skipped; the remaining handlers
//! still run and `emit` itself never fails.

use std::{
    collections::HashMap,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError, Weak,
    },
};

use log::error;

/// Event emitted by the item store after every successful write. The payload
/// is the full post-write collection.
pub const ITEMS_CHANGED: &str = "items-changed";

/// Identifies one registration on an [`EventBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<P> = Arc<dyn Fn(&P) -> anyhow::Result<()> + Send + Sync>;

struct Registry<P> {
    next_id: AtomicU64,
    handlers: Mutex<HashMap<String, Vec<(HandlerId, Handler<P>)>>>,
}

impl<P> Registry<P> {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<(HandlerId, Handler<P>)>>> {
        // A panicking handler never runs while the lock is held, so the map is
        // consistent even if the mutex was poisoned elsewhere.
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, event: &str, id: HandlerId) {
        let mut handlers = self.lock();
        if let Some(list) = handlers.get_mut(event) {
            list.retain(|(handler_id, _)| *handler_id != id);
            if list.is_empty() {
                handlers.remove(event);
            }
        }
    }
}

/// Publish/subscribe hub carrying payloads of type `P`.
///
/// Cloning the bus yields another handle to the same registrations.
///
/// # Examples
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use sieve_core::events::EventBus;
///
/// let bus: EventBus<u32> = EventBus::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// let subscription = bus.subscribe("tick", move |n: &u32| {
///     sink.lock().unwrap().push(*n);
///     Ok(())
/// });
///
/// bus.emit("tick", &1);
/// subscription.unsubscribe();
/// bus.emit("tick", &2);
///
/// assert_eq!(*seen.lock().unwrap(), vec![1]);
/// ```
pub struct EventBus<P> {
    registry: Arc<Registry<P>>,
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P: 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static> EventBus<P> {
    /// Creates a bus with no registrations.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(1),
                handlers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Registers `handler` for every future emission of `event`.
    ///
    /// The returned [`Subscription`] removes exactly this registration.
    pub fn subscribe<F>(&self, event: &str, handler: F) -> Subscription<P>
    where
        F: Fn(&P) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = HandlerId(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        self.registry
            .lock()
            .entry(event.to_string())
            .or_default()
            .push((id, Arc::new(handler)));

        Subscription {
            registry: Arc::downgrade(&self.registry),
            event: event.to_string(),
            id,
        }
    }

    /// Registers `handler` for the next emission of `event` only.
    ///
    /// The registration is removed before the handler runs.
    pub fn once<F>(&self, event: &str, handler: F) -> Subscription<P>
    where
        F: Fn(&P) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let registry = Arc::downgrade(&self.registry);
        let slot: Arc<Mutex<Option<HandlerId>>> = Arc::new(Mutex::new(None));
        let own_id = Arc::clone(&slot);
        let event_name = event.to_string();

        let subscription = self.subscribe(event, move |payload: &P| {
            let id = *own_id.lock().unwrap_or_else(PoisonError::into_inner);
            if let (Some(registry), Some(id)) = (registry.upgrade(), id) {
                registry.remove(&event_name, id);
            }
            handler(payload)
        });

        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(subscription.id);
        subscription
    }

    /// Removes a registration. Unknown IDs are ignored.
    pub fn unsubscribe(&self, event: &str, id: HandlerId) {
        self.registry.remove(event, id);
    }

    /// Number of handlers currently registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.registry.lock().get(event).map_or(0, Vec::len)
    }

    /// Invokes every handler registered for `event` with `payload`.
    ///
    /// Handlers registered or removed while an emission is running take
    /// effect from the next emission.
    pub fn emit(&self, event: &str, payload: &P) {
        let handlers: Vec<(HandlerId, Handler<P>)> = self
            .registry
            .lock()
            .get(event)
            .cloned()
            .unwrap_or_default();

        for (id, handler) in handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Error in event listener {id:?} for {event}: {e:#}"),
                Err(_) => error!("Event listener {id:?} for {event} panicked"),
            }
        }
    }
}

/// Capability removing one registration from an [`EventBus`].
///
/// Dropping the subscription keeps the handler registered.
#[must_use = "dropping a Subscription keeps the handler registered; call unsubscribe() to remove it"]
pub struct Subscription<P> {
    registry: Weak<Registry<P>>,
    event: String,
    id: HandlerId,
}

impl<P> Subscription<P> {
    /// ID of the registration this subscription controls.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Name of the event the handler listens to.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Removes the registration. Idempotent with [`EventBus::unsubscribe`].
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(&self.event, self.id);
        }
    }
}

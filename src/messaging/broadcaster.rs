/// Event broadcaster for a single event family
///
/// Each producer owns one broadcaster per event family it emits, so the
/// subscriber lists of different families (and different producers) are
/// fully independent.
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

/// Single-method capability interface for event subscribers.
///
/// Implemented for closures, so simple subscribers can be registered as
/// named function values instead of dedicated structs.
pub trait Listener<E>: Send + Sync {
    fn receive(&self, event: &E) -> anyhow::Result<()>;
}

impl<E, F> Listener<E> for F
where
    F: Fn(&E) -> anyhow::Result<()> + Send + Sync,
{
    fn receive(&self, event: &E) -> anyhow::Result<()> {
        self(event)
    }
}

struct Registration<E> {
    name: String,
    listener: Arc<dyn Listener<E>>,
}

/// Broadcasts events of one family to subscribers in registration order.
///
/// Subscription is add-only for the lifetime of the process. The subscriber
/// list lock is held for the whole delivery, so two deliveries of the same
/// family from the same producer never interleave; deliveries of different
/// families proceed independently.
pub struct Broadcaster<E> {
    family: &'static str,
    listeners: Mutex<Vec<Registration<E>>>,
}

impl<E> Broadcaster<E> {
    /// Create a broadcaster for the named event family
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register a subscriber. The name identifies the subscriber in logs.
    pub fn add_listener(&self, name: &str, listener: Arc<dyn Listener<E>>) {
        tracing::debug!("{} listener registered: {}", self.family, name);

        self.listeners.lock().push(Registration {
            name: name.to_string(),
            listener,
        });
    }

    /// Deliver an event to every subscriber, synchronously, in registration
    /// order.
    ///
    /// A subscriber that returns an error or panics is logged and skipped;
    /// the subscribers after it still receive the event exactly once.
    pub fn broadcast(&self, event: &E) {
        let listeners = self.listeners.lock();

        for registration in listeners.iter() {
            let outcome = catch_unwind(AssertUnwindSafe(|| registration.listener.receive(event)));

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(
                        "{} listener '{}' failed: {:#}",
                        self.family,
                        registration.name,
                        e
                    );
                }
                Err(_) => {
                    tracing::error!(
                        "{} listener '{}' panicked during delivery",
                        self.family,
                        registration.name
                    );
                }
            }
        }
    }

    /// Number of registered subscribers
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Subscriber names in registration order
    pub fn listener_names(&self) -> Vec<String> {
        self.listeners
            .lock()
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }
}

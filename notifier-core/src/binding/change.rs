//! Change Binding Implementation
//!
//! A ChangeBinding connects one consumer (a component, a view, anything the
//! host re-evaluates) to one notifier.
//!
//! # How Change Bindings Work
//!
//! 1. On every evaluation the consumer calls `observe` with the notifier it
//!    currently depends on.
//!
//! 2. The first time a given notifier is observed, the binding subscribes to
//!    it. Observing a different notifier later tears the old subscription
//!    down first; observing the same one again does nothing.
//!
//! 3. Each dispatch on the observed notifier flips the binding's tick and
//!    asks the host to re-run the consumer.
//!
//! 4. `observe` returns the tick. It differs from its previous value after
//!    each observed dispatch and is stable otherwise, so consumers can key
//!    caches on it.
//!
//! Dropping the binding (or calling `unobserve`) ends the subscription.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::host::RenderHost;
use super::subscription::Subscription;
use crate::notifier::{Listenable, NotifierId};

/// Binds a consumer's re-evaluation cycle to a notifier.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use notifier_core::{ChangeBinding, ChangeNotifier, PendingRerender};
///
/// let host = Rc::new(PendingRerender::new());
/// let notifier = ChangeNotifier::new();
/// let mut binding = ChangeBinding::new(host.clone());
///
/// assert!(!binding.observe(&notifier));
///
/// notifier.notify_listeners();
/// assert!(host.take());
/// assert!(binding.observe(&notifier));
/// ```
pub struct ChangeBinding<N>
where
    N: Listenable + Clone + 'static,
{
    host: Rc<dyn RenderHost>,
    tick: Rc<Cell<bool>>,
    subscription: Option<Subscription<N>>,
}

impl<N> ChangeBinding<N>
where
    N: Listenable + Clone + 'static,
{
    /// Create an unobserving binding whose tick starts at `false`.
    pub fn new(host: Rc<dyn RenderHost>) -> Self {
        Self {
            host,
            tick: Rc::new(Cell::new(false)),
            subscription: None,
        }
    }

    /// Observe `notifier` for this evaluation and return the current tick.
    ///
    /// Subscribes if this notifier is not the one currently observed.
    pub fn observe(&mut self, notifier: &N) -> bool {
        let id = notifier.id();

        if self.observed_id() != Some(id) {
            if let Some(previous) = self.subscription.take() {
                debug!(from = %previous.notifier_id(), to = %id, "re-subscribing binding");
                drop(previous);
            }

            let tick = Rc::clone(&self.tick);
            let host = Rc::clone(&self.host);
            self.subscription = Some(Subscription::new(notifier, move || {
                tick.set(!tick.get());
                host.request_rerender();
            }));
        }

        self.tick.get()
    }

    /// Stop observing. Returns `false` if nothing was observed.
    pub fn unobserve(&mut self) -> bool {
        self.subscription.take().is_some()
    }

    /// Current tick, without observing anything.
    pub fn tick(&self) -> bool {
        self.tick.get()
    }

    /// Whether the binding currently holds a subscription.
    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }

    /// ID of the notifier currently observed.
    pub fn observed_id(&self) -> Option<NotifierId> {
        self.subscription.as_ref().map(Subscription::notifier_id)
    }
}

impl<N> fmt::Debug for ChangeBinding<N>
where
    N: Listenable + Clone + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeBinding")
            .field("tick", &self.tick.get())
            .field("observing", &self.observed_id())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

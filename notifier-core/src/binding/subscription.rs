//! Scoped Subscriptions
//!
//! A Subscription ties one listener registration to a Rust scope. Creating
//! it registers the listener; dropping it cancels the listener and removes
//! it from the notifier. Because teardown lives in `Drop`, it also runs when
//! the owning scope unwinds.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::notifier::{Listenable, Listener, NotifierId};

/// Guard for a listener registered on a notifier.
///
/// The registered listener checks a cancellation flag before running the
/// callback. The flag is set first thing in `drop`, so a dispatch pass whose
/// snapshot still contains the listener cannot reach the callback once the
/// subscription is gone.
pub struct Subscription<N>
where
    N: Listenable,
{
    notifier: N,
    listener: Listener,
    cancelled: Rc<Cell<bool>>,
}

impl<N> Subscription<N>
where
    N: Listenable + Clone,
{
    /// Register `on_change` with `notifier` for the lifetime of the guard.
    pub fn new<F>(notifier: &N, on_change: F) -> Self
    where
        F: Fn() + 'static,
    {
        let cancelled = Rc::new(Cell::new(false));
        let flag = Rc::clone(&cancelled);
        let listener = Listener::new(move || {
            if flag.get() {
                trace!("change ignored by cancelled subscription");
                return;
            }
            on_change();
        });

        notifier.add_listener(listener.clone());
        debug!(notifier = %notifier.id(), listener = %listener.id(), "subscribed");

        Self {
            notifier: notifier.clone(),
            listener,
            cancelled,
        }
    }
}

impl<N> Subscription<N>
where
    N: Listenable,
{
    /// ID of the notifier this subscription is registered with.
    pub fn notifier_id(&self) -> NotifierId {
        self.notifier.id()
    }

    /// The listener registered on the notifier.
    pub fn listener(&self) -> &Listener {
        &self.listener
    }
}

impl<N> Drop for Subscription<N>
where
    N: Listenable,
{
    fn drop(&mut self) {
        self.cancelled.set(true);
        let removed = self.notifier.detach_listener(&self.listener);
        debug!(
            notifier = %self.notifier.id(),
            listener = %self.listener.id(),
            removed,
            "unsubscribed"
        );
    }
}

impl<N> fmt::Debug for Subscription<N>
where
    N: Listenable,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("notifier", &self.notifier.id())
            .field("listener", &self.listener.id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{ChangeNotifier, NotifierConfig, RemovalPolicy};
    use std::cell::RefCell;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn subscription_registers_and_unregisters() {
        let notifier = ChangeNotifier::new();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let subscription = Subscription::new(&notifier, move || {
            count_clone.set(count_clone.get() + 1)
        });
        assert_eq!(subscription.notifier_id(), notifier.id());
        assert_eq!(notifier.listener_count(), 1);

        notifier.notify_listeners();
        assert_eq!(count.get(), 1);

        drop(subscription);
        assert!(!notifier.has_listeners());

        notifier.notify_listeners();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn cancelled_listener_is_silent_within_current_pass() {
        let notifier = ChangeNotifier::new();
        let count = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription<ChangeNotifier>>>> = Rc::new(RefCell::new(None));

        // Registered first, so it runs before the subscription's listener in
        // the same snapshot.
        let slot_clone = slot.clone();
        notifier.add_listener(Listener::new(move || {
            slot_clone.borrow_mut().take();
        }));

        let count_clone = count.clone();
        *slot.borrow_mut() = Some(Subscription::new(&notifier, move || {
            count_clone.set(count_clone.get() + 1)
        }));

        notifier.notify_listeners();
        assert_eq!(count.get(), 0);
        assert_eq!(notifier.listener_count(), 1);
    }

    #[test]
    fn teardown_never_evicts_other_listeners() {
        let config = NotifierConfig::new().with_removal(RemovalPolicy::RemoveLast);
        let notifier = ChangeNotifier::with_config(config);
        let other_count = Rc::new(Cell::new(0));

        let subscription = Subscription::new(&notifier, || {});
        let other_clone = other_count.clone();
        notifier.add_listener(Listener::new(move || other_clone.set(other_clone.get() + 1)));

        // Someone else already took the subscription's entry out.
        assert!(notifier.remove_listener(subscription.listener()));
        assert_eq!(notifier.listener_count(), 1);

        drop(subscription);
        assert_eq!(notifier.listener_count(), 1);

        notifier.notify_listeners();
        assert_eq!(other_count.get(), 1);
    }

    #[test]
    fn teardown_runs_on_unwind() {
        let notifier = ChangeNotifier::new();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _subscription = Subscription::new(&notifier, || {});
            assert!(notifier.has_listeners());
            panic!("consumer failed");
        }));

        assert!(result.is_err());
        assert!(!notifier.has_listeners());
    }
}

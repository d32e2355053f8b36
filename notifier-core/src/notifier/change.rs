//! Change Notifier Implementation
//!
//! A ChangeNotifier is the basic registry: an ordered list of listeners that
//! are invoked, in registration order, whenever the owner dispatches.
//!
//! # How Dispatch Works
//!
//! 1. `notify_listeners` clones the current listener list into a snapshot.
//!
//! 2. The registry borrow is released before any listener runs.
//!
//! 3. Every entry of the snapshot is invoked in order.
//!
//! Because listeners run against a snapshot, a listener may freely add or
//! remove listeners (or dispatch again) on the same notifier. Listeners added
//! during a pass are first invoked by the next pass; listeners removed during
//! a pass are still invoked by the current one.
//!
//! # Failure
//!
//! A panicking listener is not caught. The panic propagates out of
//! `notify_listeners` and the rest of the snapshot is skipped. The registry
//! itself stays consistent since no borrow is held while listeners run.
//!
//! # Costs
//!
//! Adding is O(1). Removing and dispatching are O(N) in the number of
//! registered entries.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;
use tracing::{trace, warn};

use super::config::{NotifierConfig, RemovalPolicy};
use super::error::{NotifierError, Result};
use super::listener::Listener;

/// Inline capacity of the listener list and of dispatch snapshots.
const INLINE_LISTENERS: usize = 4;

type ListenerList = SmallVec<[Listener; INLINE_LISTENERS]>;

/// Unique identifier for a notifier.
///
/// Clones of a notifier handle share the same ID. Bindings use it to decide
/// whether they are still observing the same notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotifierId(u64);

impl NotifierId {
    /// Generate a new unique notifier ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for NotifierId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notifier#{}", self.0)
    }
}

/// The listen side of a notifier.
///
/// This is everything a consumer may do with a notifier it does not own.
/// Dispatching is deliberately absent: only the owner of the state decides
/// when listeners run.
pub trait Listenable {
    /// Identity of the underlying notifier.
    fn id(&self) -> NotifierId;

    /// Append a listener to the end of the list.
    fn add_listener(&self, listener: Listener);

    /// Remove the first entry equal to `listener`.
    ///
    /// Returns `true` if `listener` was found and removed.
    fn remove_listener(&self, listener: &Listener) -> bool;

    /// Remove the first entry equal to `listener`, never touching any other
    /// entry whatever the removal policy.
    ///
    /// Returns `true` if `listener` was found and removed.
    fn detach_listener(&self, listener: &Listener) -> bool;

    /// Whether any listeners are currently registered.
    fn has_listeners(&self) -> bool;
}

struct NotifierInner {
    listeners: RefCell<ListenerList>,
    config: NotifierConfig,
}

/// An ordered listener registry that owners dispatch on change.
///
/// `ChangeNotifier` is a cheap handle; clones share the same listener list.
/// It is meant to be embedded in types that own mutable state and call
/// [`notify_listeners`](Self::notify_listeners) after mutating it. Such types
/// should keep the embedded notifier private and expose [`Listenable`]
/// instead, as [`ValueNotifier`](super::ValueNotifier) does.
///
/// # Example
///
/// ```rust
/// use notifier_core::{ChangeNotifier, Listener};
///
/// let notifier = ChangeNotifier::new();
/// let listener = Listener::new(|| println!("changed"));
///
/// notifier.add_listener(listener.clone());
/// notifier.notify_listeners();
/// notifier.remove_listener(&listener);
/// ```
#[derive(Clone)]
pub struct ChangeNotifier {
    id: NotifierId,
    inner: Rc<NotifierInner>,
}

impl ChangeNotifier {
    /// Create an empty notifier with the default configuration.
    pub fn new() -> Self {
        Self::with_config(NotifierConfig::default())
    }

    /// Create an empty notifier with the given configuration.
    pub fn with_config(config: NotifierConfig) -> Self {
        Self {
            id: NotifierId::new(),
            inner: Rc::new(NotifierInner {
                listeners: RefCell::new(SmallVec::new()),
                config,
            }),
        }
    }

    /// Get the notifier's unique ID.
    pub fn id(&self) -> NotifierId {
        self.id
    }

    /// Get the configuration this notifier was created with.
    pub fn config(&self) -> NotifierConfig {
        self.inner.config
    }

    /// Register a listener to be called when the notifier dispatches.
    ///
    /// No uniqueness check is made: adding the same listener twice produces
    /// two entries, and it is invoked twice per dispatch.
    pub fn add_listener(&self, listener: Listener) {
        let mut listeners = self.inner.listeners.borrow_mut();
        listeners.push(listener);
        trace!(notifier = %self.id, listeners = listeners.len(), "listener added");
    }

    /// Remove the first entry equal to `listener`.
    ///
    /// Returns `true` if `listener` was found and removed. When it is not
    /// registered the outcome depends on the configured [`RemovalPolicy`];
    /// the return value is `false` either way.
    pub fn remove_listener(&self, listener: &Listener) -> bool {
        let (removed, found) = {
            let mut listeners = self.inner.listeners.borrow_mut();
            match listeners.iter().position(|entry| entry == listener) {
                Some(index) => (Some(listeners.remove(index)), true),
                None => match self.inner.config.removal {
                    RemovalPolicy::Ignore => (None, false),
                    RemovalPolicy::RemoveLast => {
                        let last = listeners.pop();
                        warn!(
                            notifier = %self.id,
                            listener = %listener.id(),
                            evicted = ?last.as_ref().map(Listener::id),
                            "removing unregistered listener, evicting last entry"
                        );
                        (last, false)
                    }
                },
            }
        };

        trace!(
            notifier = %self.id,
            listener = %listener.id(),
            found,
            listeners = self.listener_count(),
            "listener removal"
        );

        // Dropped outside the borrow: the callback's captures may touch this
        // notifier when they go away.
        drop(removed);
        found
    }

    /// Remove the first entry equal to `listener`, failing if there is none.
    ///
    /// Unlike [`remove_listener`](Self::remove_listener), a miss never
    /// modifies the list regardless of the removal policy.
    pub fn try_remove_listener(&self, listener: &Listener) -> Result<()> {
        match self.take_listener(listener) {
            Some(_) => Ok(()),
            None => Err(NotifierError::ListenerNotRegistered {
                listener: listener.id(),
            }),
        }
    }

    /// Remove the first entry equal to `listener`, ignoring the removal
    /// policy.
    ///
    /// A miss leaves the list untouched and returns `false`. Scoped owners
    /// of a registration use this so their teardown can never evict some
    /// other listener.
    pub fn detach_listener(&self, listener: &Listener) -> bool {
        self.take_listener(listener).is_some()
    }

    fn take_listener(&self, listener: &Listener) -> Option<Listener> {
        let removed = {
            let mut listeners = self.inner.listeners.borrow_mut();
            listeners
                .iter()
                .position(|entry| entry == listener)
                .map(|index| listeners.remove(index))
        };

        trace!(
            notifier = %self.id,
            listener = %listener.id(),
            found = removed.is_some(),
            "listener detach"
        );
        removed
    }

    /// Whether any listeners are currently registered.
    ///
    /// Callers should not change their observable behavior based on this;
    /// it exists so owners can skip work nobody is listening for.
    pub fn has_listeners(&self) -> bool {
        !self.inner.listeners.borrow().is_empty()
    }

    /// Number of registered entries, counting duplicates.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Call all the registered listeners.
    ///
    /// Owners call this whenever their state changed. Listeners added during
    /// this pass are not visited; listeners removed during this pass are
    /// still visited.
    pub fn notify_listeners(&self) {
        let snapshot: ListenerList = self.inner.listeners.borrow().clone();

        if snapshot.is_empty() {
            return;
        }

        trace!(notifier = %self.id, listeners = snapshot.len(), "dispatching");
        for listener in &snapshot {
            listener.call();
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Listenable for ChangeNotifier {
    fn id(&self) -> NotifierId {
        self.id
    }

    fn add_listener(&self, listener: Listener) {
        ChangeNotifier::add_listener(self, listener);
    }

    fn remove_listener(&self, listener: &Listener) -> bool {
        ChangeNotifier::remove_listener(self, listener)
    }

    fn detach_listener(&self, listener: &Listener) -> bool {
        ChangeNotifier::detach_listener(self, listener)
    }

    fn has_listeners(&self) -> bool {
        ChangeNotifier::has_listeners(self)
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("id", &self.id)
            .field("listener_count", &self.listener_count())
            .field("config", &self.inner.config)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

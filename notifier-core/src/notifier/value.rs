//! Value Notifier Implementation
//!
//! A ValueNotifier holds a single value and dispatches its listeners when
//! the value is written.
//!
//! Under the default [`NotifyPolicy::Always`], every `set` dispatches, even
//! when the new value compares equal to the old one. The comparison only
//! decides whether the stored value is replaced. [`NotifyPolicy::OnChange`]
//! gates dispatch on the comparison instead.

use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::rc::Rc;

use super::change::{ChangeNotifier, Listenable, NotifierId};
use super::config::{NotifierConfig, NotifyPolicy};
use super::error::Result;
use super::listener::Listener;

/// A notifier that wraps a single value of type `T`.
///
/// Clones share the value and the listener list.
///
/// # Example
///
/// ```rust
/// use notifier_core::{Listener, ValueNotifier};
///
/// let count = ValueNotifier::new(0);
/// let observer = count.clone();
/// count.add_listener(Listener::new(move || println!("count = {}", observer.get())));
///
/// count.update(|v| v + 1); // prints "count = 1"
/// ```
pub struct ValueNotifier<T> {
    /// Kept private so only writes to the value can dispatch.
    notifier: ChangeNotifier,

    value: Rc<RefCell<T>>,
}

impl<T> ValueNotifier<T>
where
    T: PartialEq + 'static,
{
    /// Create a value notifier with the default configuration.
    pub fn new(value: T) -> Self {
        Self::with_config(value, NotifierConfig::default())
    }

    /// Create a value notifier with the given configuration.
    pub fn with_config(value: T, config: NotifierConfig) -> Self {
        Self {
            notifier: ChangeNotifier::with_config(config),
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Get the notifier's unique ID.
    pub fn id(&self) -> NotifierId {
        self.notifier.id()
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// Read the current value by reference.
    ///
    /// The value is borrowed for the duration of `f`; writing to this
    /// notifier from inside `f` panics.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Write a new value and dispatch.
    ///
    /// The stored value is replaced only if it differs from `value`.
    /// Whether listeners run for an equal value depends on the configured
    /// [`NotifyPolicy`]. The value is no longer borrowed when listeners run,
    /// so they may read or write it.
    pub fn set(&self, value: T) {
        let changed = {
            let mut current = self.value.borrow_mut();
            if *current != value {
                *current = value;
                true
            } else {
                false
            }
        };

        match self.notifier.config().notify {
            NotifyPolicy::Always => self.notifier.notify_listeners(),
            NotifyPolicy::OnChange if changed => self.notifier.notify_listeners(),
            NotifyPolicy::OnChange => {}
        }
    }

    /// Compute a new value from the current one, then [`set`](Self::set) it.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let new_value = f(&self.value.borrow());
        self.set(new_value);
    }

    /// Register a listener; see [`ChangeNotifier::add_listener`].
    pub fn add_listener(&self, listener: Listener) {
        self.notifier.add_listener(listener);
    }

    /// Remove a listener; see [`ChangeNotifier::remove_listener`].
    pub fn remove_listener(&self, listener: &Listener) -> bool {
        self.notifier.remove_listener(listener)
    }

    /// Remove a listener strictly; see [`ChangeNotifier::try_remove_listener`].
    pub fn try_remove_listener(&self, listener: &Listener) -> Result<()> {
        self.notifier.try_remove_listener(listener)
    }

    /// Remove a listener ignoring the policy; see [`ChangeNotifier::detach_listener`].
    pub fn detach_listener(&self, listener: &Listener) -> bool {
        self.notifier.detach_listener(listener)
    }

    /// Whether any listeners are currently registered.
    pub fn has_listeners(&self) -> bool {
        self.notifier.has_listeners()
    }

    /// Number of registered entries, counting duplicates.
    pub fn listener_count(&self) -> usize {
        self.notifier.listener_count()
    }
}

impl<T> Clone for ValueNotifier<T> {
    fn clone(&self) -> Self {
        Self {
            notifier: self.notifier.clone(),
            value: Rc::clone(&self.value),
        }
    }
}

impl<T> Default for ValueNotifier<T>
where
    T: Default + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Listenable for ValueNotifier<T>
where
    T: PartialEq + 'static,
{
    fn id(&self) -> NotifierId {
        self.notifier.id()
    }

    fn add_listener(&self, listener: Listener) {
        self.notifier.add_listener(listener);
    }

    fn remove_listener(&self, listener: &Listener) -> bool {
        self.notifier.remove_listener(listener)
    }

    fn detach_listener(&self, listener: &Listener) -> bool {
        self.notifier.detach_listener(listener)
    }

    fn has_listeners(&self) -> bool {
        self.notifier.has_listeners()
    }
}

impl<T> Debug for ValueNotifier<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueNotifier")
            .field("id", &self.notifier.id())
            .field("value", &*self.value.borrow())
            .field("listener_count", &self.notifier.listener_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

//! Value Binding Implementation
//!
//! A ValueBinding exposes a [`ValueNotifier`]'s current value to a consumer.
//! It wraps a [`ChangeBinding`] and caches the value it last read, keyed on
//! the observed notifier and the change tick.
//!
//! The cache is re-read from the notifier only when the tick differs from
//! the one it was read under, or when a different notifier is observed.
//! Since the tick is a single bit, two dispatches between evaluations leave
//! it where it was and the cached value is returned. Hosts that coalesce
//! re-render requests should re-evaluate after each one if they need every
//! intermediate value.

use std::fmt::{self, Debug};
use std::rc::Rc;

use super::change::ChangeBinding;
use super::host::RenderHost;
use crate::notifier::{NotifierId, ValueNotifier};

struct CachedValue<T> {
    notifier: NotifierId,
    tick: bool,
    value: T,
}

/// Binds a consumer to the value held by a [`ValueNotifier`].
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use notifier_core::{PendingRerender, ValueBinding, ValueNotifier};
///
/// let host = Rc::new(PendingRerender::new());
/// let count = ValueNotifier::new(10);
/// let mut binding = ValueBinding::new(host.clone());
///
/// assert_eq!(binding.observe(&count), 10);
///
/// count.update(|v| v + 1);
/// assert!(host.take());
/// assert_eq!(binding.observe(&count), 11);
/// ```
pub struct ValueBinding<T>
where
    T: Clone + PartialEq + 'static,
{
    change: ChangeBinding<ValueNotifier<T>>,
    cached: Option<CachedValue<T>>,
}

impl<T> ValueBinding<T>
where
    T: Clone + PartialEq + 'static,
{
    /// Create an unobserving binding.
    pub fn new(host: Rc<dyn RenderHost>) -> Self {
        Self {
            change: ChangeBinding::new(host),
            cached: None,
        }
    }

    /// Observe `notifier` for this evaluation and return its value.
    pub fn observe(&mut self, notifier: &ValueNotifier<T>) -> T {
        let tick = self.change.observe(notifier);
        let id = notifier.id();

        if let Some(cached) = &self.cached {
            if cached.notifier == id && cached.tick == tick {
                return cached.value.clone();
            }
        }

        let value = notifier.get();
        self.cached = Some(CachedValue {
            notifier: id,
            tick,
            value: value.clone(),
        });
        value
    }

    /// Stop observing. Returns `false` if nothing was observed.
    ///
    /// Writes made while unsubscribed do not move the tick, so the cached
    /// value is discarded and the next `observe` reads the notifier.
    pub fn unobserve(&mut self) -> bool {
        self.cached = None;
        self.change.unobserve()
    }

    /// Whether the binding currently holds a subscription.
    pub fn is_observing(&self) -> bool {
        self.change.is_observing()
    }

    /// Current change tick.
    pub fn tick(&self) -> bool {
        self.change.tick()
    }
}

impl<T> Debug for ValueBinding<T>
where
    T: Clone + PartialEq + Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueBinding")
            .field("change", &self.change)
            .field("cached", &self.cached.as_ref().map(|cached| &cached.value))
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

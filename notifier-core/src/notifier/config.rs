//! Notifier Configuration
//!
//! Two behaviors of the notifiers are policy choices rather than fixed
//! contracts:
//!
//! - What `remove_listener` does when the listener is not registered.
//! - Whether `ValueNotifier::set` dispatches when the new value equals the
//!   old one.
//!
//! Both default to the behavior existing callers rely on. The config is
//! serializable so hosts can carry it in their own settings files.

use serde::{Deserialize, Serialize};

/// What to do when `remove_listener` cannot find the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Leave the sequence untouched.
    #[default]
    Ignore,

    /// Remove the last registered entry instead.
    ///
    /// Compatibility mode for code written against registries that used a
    /// find-index-then-splice removal without checking the "not found"
    /// sentinel. Every miss is logged at `warn`.
    RemoveLast,
}

/// When a `ValueNotifier` dispatches on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    /// Dispatch on every write, even if the value compared equal.
    #[default]
    Always,

    /// Dispatch only when the written value differs from the stored one.
    OnChange,
}

/// Configuration shared by `ChangeNotifier` and `ValueNotifier`.
///
/// `ChangeNotifier` only consults `removal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Behavior of `remove_listener` on a miss.
    pub removal: RemovalPolicy,

    /// Behavior of `ValueNotifier::set` on an equal value.
    pub notify: NotifyPolicy,
}

impl NotifierConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the removal policy.
    pub fn with_removal(mut self, removal: RemovalPolicy) -> Self {
        self.removal = removal;
        self
    }

    /// Set the notify policy.
    pub fn with_notify(mut self, notify: NotifyPolicy) -> Self {
        self.notify = notify;
        self
    }
}

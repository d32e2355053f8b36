//! Error types for notifier operations.

use thiserror::Error;

use super::listener::ListenerId;

/// Errors returned by the strict notifier APIs.
///
/// The lenient operations (`remove_listener` and friends) never fail; only
/// `try_remove_listener` surfaces this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifierError {
    /// The listener is not currently registered with the notifier.
    #[error("{listener} is not registered with this notifier")]
    ListenerNotRegistered {
        /// The listener that was looked up.
        listener: ListenerId,
    },
}

/// Result alias for notifier operations.
pub type Result<T> = std::result::Result<T, NotifierError>;

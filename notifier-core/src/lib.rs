//! Notifier Core
//!
//! This crate provides a small change-notification layer for single-threaded
//! applications. It implements:
//!
//! - A listener registry with snapshot-based dispatch ([`ChangeNotifier`])
//! - A single-value notifier built on it ([`ValueNotifier`])
//! - Bindings that turn dispatches into re-render requests for a host UI
//!   ([`ChangeBinding`], [`ValueBinding`])
//!
//! There is no dependency graph, batching or scheduling here. A notifier
//! calls its listeners synchronously, in registration order, every time its
//! owner dispatches.
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `notifier`: listeners, the registry, the value container, config and errors
//! - `binding`: the host capability, scoped subscriptions and the bindings
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use notifier_core::{PendingRerender, ValueBinding, ValueNotifier};
//!
//! // Shared state
//! let count = ValueNotifier::new(0);
//!
//! // A consumer rendered by some host
//! let host = Rc::new(PendingRerender::new());
//! let mut binding = ValueBinding::new(host.clone());
//! assert_eq!(binding.observe(&count), 0);
//!
//! // Writing the value asks the host to re-render the consumer
//! count.set(5);
//! if host.take() {
//!     assert_eq!(binding.observe(&count), 5);
//! }
//! ```

pub mod binding;
pub mod notifier;

pub use binding::{ChangeBinding, PendingRerender, RenderHost, Subscription, ValueBinding};
pub use notifier::{
    ChangeNotifier, Listenable, Listener, ListenerId, NotifierConfig, NotifierError, NotifierId,
    NotifyPolicy, RemovalPolicy, Result, ValueNotifier,
};

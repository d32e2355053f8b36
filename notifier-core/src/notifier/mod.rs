//! Change Notifiers
//!
//! This module implements the notification primitives: a listener registry
//! and a single-value container built on it.
//!
//! # Concepts
//!
//! ## ChangeNotifier
//!
//! An ordered list of listeners. Owners of mutable state embed one and call
//! `notify_listeners` after each mutation. Every dispatch runs against a
//! snapshot of the list, so listeners may register, unregister or dispatch
//! again while it is running.
//!
//! ## ValueNotifier
//!
//! A ChangeNotifier paired with a single value. Writing the value is the
//! only way to make it dispatch.
//!
//! ## Listenable
//!
//! The consumer-facing half of both: add, remove and inspect listeners, but
//! never dispatch. Bindings are written against this trait.
//!
//! # Threading
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Notifiers are not
//! `Send` and listeners run synchronously on the thread that dispatches.

mod change;
mod config;
mod error;
mod listener;
mod value;

pub use change::{ChangeNotifier, Listenable, NotifierId};
pub use config::{NotifierConfig, NotifyPolicy, RemovalPolicy};
pub use error::{NotifierError, Result};
pub use listener::{Listener, ListenerId};
pub use value::ValueNotifier;

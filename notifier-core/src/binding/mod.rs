//! Render Bindings
//!
//! Adapters that connect notifiers to a host's re-evaluation cycle.
//!
//! - [`ChangeBinding`]: subscribes a consumer to any [`Listenable`] and
//!   exposes a tick that flips on every dispatch.
//! - [`ValueBinding`]: a `ChangeBinding` over a [`ValueNotifier`] that
//!   exposes the value, re-read only when the tick moves.
//! - [`Subscription`]: the scoped registration both are built on.
//! - [`RenderHost`]: the capability the host provides to be told a consumer
//!   must re-run.
//!
//! Bindings have no knowledge of any particular UI or scheduler. They call
//! `RenderHost::request_rerender` and leave the rest to the host.
//!
//! [`Listenable`]: crate::notifier::Listenable
//! [`ValueNotifier`]: crate::notifier::ValueNotifier

mod change;
mod host;
mod subscription;
mod value;

pub use change::ChangeBinding;
pub use host::{PendingRerender, RenderHost};
pub use subscription::Subscription;
pub use value::ValueBinding;

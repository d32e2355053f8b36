//! Render Host Capability
//!
//! Bindings never schedule work themselves. When an observed notifier
//! dispatches they ask the host to re-run the consumer, and the host decides
//! when that happens. Any `Fn()` closure is a host; [`PendingRerender`] is a
//! ready-made one for frame-loop renderers that poll a dirty flag.

use std::cell::Cell;

use tracing::trace;

/// A rendering framework's "this consumer needs to re-run" capability.
pub trait RenderHost {
    /// Request that the consumer be evaluated again.
    ///
    /// Called synchronously from inside a notifier dispatch. Implementations
    /// should record the request and return; re-running the consumer from
    /// here re-enters the dispatch that is still in progress.
    fn request_rerender(&self);
}

impl<F> RenderHost for F
where
    F: Fn(),
{
    fn request_rerender(&self) {
        self();
    }
}

/// A host that records re-render requests as a dirty flag.
///
/// A render loop calls [`take`](Self::take) once per frame and re-evaluates
/// the consumer when it returns `true`. Several requests between two frames
/// collapse into one re-evaluation.
#[derive(Debug, Default)]
pub struct PendingRerender {
    pending: Cell<bool>,
    requests: Cell<u64>,
}

impl PendingRerender {
    /// Create a host with no pending request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a re-render has been requested since the last `take`.
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Clear the pending flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }

    /// Total number of requests received.
    pub fn request_count(&self) -> u64 {
        self.requests.get()
    }
}

impl RenderHost for PendingRerender {
    fn request_rerender(&self) {
        let requests = self.requests.get() + 1;
        self.requests.set(requests);
        self.pending.set(true);
        trace!(requests, "re-render requested");
    }
}

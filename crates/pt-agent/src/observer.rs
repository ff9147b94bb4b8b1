//! Behaviour lifecycle callbacks.

use pt_behavior::{BehaviorKind, RunEnd};

/// Callbacks invoked by [`Agent`][crate::Agent] as behaviours start and end.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  `on_ended` runs on a pool worker.
pub trait AgentObserver: Send + Sync {
    /// Called after a behaviour has claimed the slot and been submitted.
    fn on_started(&self, _kind: BehaviorKind) {}

    /// Called when a behaviour run returns.  Not called if it panicked.
    fn on_ended(&self, _kind: BehaviorKind, _end: RunEnd) {}

    /// Called when `stop` or `toggle` clears an active behaviour.
    fn on_stopped(&self, _kind: BehaviorKind) {}
}

/// An [`AgentObserver`] that does nothing.
pub struct NoopObserver;

impl AgentObserver for NoopObserver {}

//! Agent-wide mode flags and per-run cooperative checkpoints.
//!
//! # Model
//!
//! Behaviours never get pre-empted.  Every wait inside a behaviour goes
//! through a [`Checkpoint`], which returns `Err(Interrupted)` as soon as the
//! agent is exiting or the behaviour's [`RunFlag`] has been cleared.  Waiting
//! is an `.await`, so a sleeping or paused behaviour holds no worker thread.
//!
//! ```text
//! Control  (one per agent)     exiting ──┐
//!                              paused  ──┼──► Checkpoint::{check, sleep, wait_unpaused, guard}
//! RunFlag  (one per behaviour) active  ──┘
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::Interrupted;

// ── Control ───────────────────────────────────────────────────────────────────

/// Exit and pause state shared by everything running for one agent.
///
/// Both flags are `watch` channels so waiters wake on change instead of
/// polling.
#[derive(Debug)]
pub struct Control {
    exiting: watch::Sender<bool>,
    paused:  watch::Sender<bool>,
}

impl Default for Control {
    fn default() -> Self {
        Self::new()
    }
}

impl Control {
    pub fn new() -> Self {
        Self {
            exiting: watch::Sender::new(false),
            paused:  watch::Sender::new(false),
        }
    }

    pub fn is_exiting(&self) -> bool {
        *self.exiting.borrow()
    }

    /// Raise the exit flag.  Irreversible.
    pub fn begin_exit(&self) {
        self.exiting.send_replace(true);
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    pub fn pause(&self) {
        self.paused.send_replace(true);
    }

    pub fn resume(&self) {
        self.paused.send_replace(false);
    }

    /// Resolves once [`begin_exit`][Self::begin_exit] has been called.
    pub async fn exited(&self) {
        let mut rx = self.exiting.subscribe();
        let _ = rx.wait_for(|exiting| *exiting).await;
    }

    /// Resolves once the agent is not paused.
    pub async fn unpaused(&self) {
        let mut rx = self.paused.subscribe();
        let _ = rx.wait_for(|paused| !*paused).await;
    }
}

// ── RunFlag ───────────────────────────────────────────────────────────────────

/// The "still active" flag of one behaviour run.
///
/// Cloning shares the flag.  Starts active; [`stop`][Self::stop] is final.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<watch::Sender<bool>>);

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl RunFlag {
    pub fn new() -> Self {
        Self(Arc::new(watch::Sender::new(true)))
    }

    pub fn is_active(&self) -> bool {
        *self.0.borrow()
    }

    pub fn stop(&self) {
        self.0.send_replace(false);
    }

    /// Resolves once the flag has been cleared.
    pub async fn stopped(&self) {
        let mut rx = self.0.subscribe();
        let _ = rx.wait_for(|active| !*active).await;
    }

    /// `true` if both handles share one flag.
    pub fn same_run(&self, other: &RunFlag) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ── Checkpoint ────────────────────────────────────────────────────────────────

/// Cooperative yield point for one behaviour run.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    control: Arc<Control>,
    run:     RunFlag,
}

impl Checkpoint {
    pub fn new(control: Arc<Control>, run: RunFlag) -> Self {
        Self { control, run }
    }

    pub fn control(&self) -> &Arc<Control> {
        &self.control
    }

    pub fn run(&self) -> &RunFlag {
        &self.run
    }

    /// `true` while the run should keep going.
    pub fn is_live(&self) -> bool {
        self.run.is_active() && !self.control.is_exiting()
    }

    pub fn check(&self) -> Result<(), Interrupted> {
        if self.is_live() { Ok(()) } else { Err(Interrupted) }
    }

    /// Resolves once the run is exiting or stopped.
    pub async fn interrupted(&self) {
        tokio::select! {
            _ = self.control.exited() => {}
            _ = self.run.stopped() => {}
        }
    }

    /// Sleep for `duration`, waking early on interruption.
    pub async fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        self.check()?;
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = self.interrupted() => {}
        }
        self.check()
    }

    /// Block until the agent is unpaused.  Returns immediately when not
    /// paused.
    pub async fn wait_unpaused(&self) -> Result<(), Interrupted> {
        self.check()?;
        if self.control.is_paused() {
            tokio::select! {
                _ = self.control.unpaused() => {}
                _ = self.interrupted() => {}
            }
        }
        self.check()
    }

    /// Await `fut`, abandoning it on interruption.
    pub async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, Interrupted> {
        self.check()?;
        tokio::select! {
            out = fut => Ok(out),
            _ = self.interrupted() => Err(Interrupted),
        }
    }
}

//! Fixed-size worker pool for behaviour tasks.
//!
//! # Panics
//!
//! Every submitted future runs under a supervising task.  If the future
//! panics, the supervisor logs the payload at `error` level and the pool
//! keeps running; nothing reaches the caller.
//!
//! # Shutdown
//!
//! [`TaskPool::shutdown`] closes the pool to new submissions and waits up to
//! `shutdown_timeout` for in-flight tasks.  Tasks still running afterwards
//! are logged and left to finish (or be dropped with the runtime).

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::{ScheduleError, ScheduleResult};

// ── PoolConfig ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Number of worker threads.
    pub worker_threads:   usize,
    /// Worker threads are named `<thread_name>-worker-<n>`.
    pub thread_name:      String,
    /// How long [`TaskPool::shutdown`] waits for in-flight tasks.
    pub shutdown_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            worker_threads:   4,
            thread_name:      "pathing".into(),
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

// ── TaskPool ──────────────────────────────────────────────────────────────────

/// A tokio runtime dedicated to one agent, or a handle onto an existing one.
pub struct TaskPool {
    /// `None` when the pool borrows a caller's runtime.
    runtime:   Option<Runtime>,
    handle:    Handle,
    closed:    AtomicBool,
    in_flight: Arc<watch::Sender<usize>>,
    config:    PoolConfig,
}

impl TaskPool {
    /// Start a dedicated multi-thread runtime.
    pub fn new(config: PoolConfig) -> ScheduleResult<Self> {
        let name = config.thread_name.clone();
        let next_id = AtomicUsize::new(0);
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .thread_name_fn(move || {
                format!("{name}-worker-{}", next_id.fetch_add(1, Ordering::Relaxed))
            })
            .enable_all()
            .build()?;
        let handle = runtime.handle().clone();
        debug!(workers = config.worker_threads, name = %config.thread_name, "task pool started");
        Ok(Self::assemble(Some(runtime), handle, config))
    }

    /// Run tasks on an existing runtime.  Worker count and thread naming
    /// are then the caller's.
    pub fn with_handle(handle: Handle, config: PoolConfig) -> Self {
        Self::assemble(None, handle, config)
    }

    fn assemble(runtime: Option<Runtime>, handle: Handle, config: PoolConfig) -> Self {
        Self {
            runtime,
            handle,
            closed: AtomicBool::new(false),
            in_flight: Arc::new(watch::Sender::new(0)),
            config,
        }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of submitted tasks that have not finished.
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Run `task` on the pool.  The returned handle resolves when the task
    /// finishes or panics.
    pub fn submit<F>(&self, name: &str, task: F) -> ScheduleResult<JoinHandle<()>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_closed() {
            return Err(ScheduleError::PoolClosed);
        }

        let guard = InFlight::enter(self.in_flight.clone());
        let name = name.to_owned();
        let inner = self.handle.spawn(task);
        Ok(self.handle.spawn(async move {
            let _guard = guard;
            match inner.await {
                Ok(()) => debug!(task = %name, "task finished"),
                Err(err) if err.is_panic() => {
                    let payload = err.into_panic();
                    error!(task = %name, panic = panic_message(&*payload), "task panicked");
                }
                Err(_) => debug!(task = %name, "task cancelled"),
            }
        }))
    }

    /// Close to new submissions.  Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Close, then wait up to `shutdown_timeout` for in-flight tasks.
    /// Returns `false` (and logs) if tasks were still running.
    pub async fn shutdown(&self) -> bool {
        self.close();
        let mut rx = self.in_flight.subscribe();
        let drained = tokio::time::timeout(self.config.shutdown_timeout, async {
            let _ = rx.wait_for(|n| *n == 0).await;
        })
        .await
        .is_ok();
        if !drained {
            warn!(
                remaining = self.in_flight(),
                timeout = ?self.config.shutdown_timeout,
                "task pool did not drain before timeout"
            );
        }
        drained
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        // Non-blocking, so a pool may be dropped from async code.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Decrements the in-flight count when the supervising task ends.
struct InFlight(Arc<watch::Sender<usize>>);

impl InFlight {
    fn enter(counter: Arc<watch::Sender<usize>>) -> Self {
        counter.send_modify(|n| *n += 1);
        Self(counter)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic>")
}

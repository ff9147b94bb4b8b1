//! Delayed and one-shot callback loop.
//!
//! # Iteration order
//!
//! ```text
//! loop:
//!   ① absorb commands already queued on the channel
//!   ② run every delayed task whose trigger has passed, earliest first
//!   ③ run the one-shots queued before this iteration
//!      (one-shots queued by ③ itself run next iteration)
//!   ④ wait for a new command, the next trigger, or exit
//! ```
//!
//! Jobs run inline on the loop; long work belongs on the
//! [`TaskPool`][crate::TaskPool].  A panicking job is logged and skipped.

use std::collections::VecDeque;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, trace};

use crate::pool::panic_message;
use crate::{Control, Job, PendingTasks, ScheduleError, ScheduleResult};

/// Commands accepted by the [`Scheduler`] loop.
enum Command {
    Schedule { delay: Duration, job: Job },
    Execute(Job),
}

// ── SchedulerHandle ───────────────────────────────────────────────────────────

/// Cloneable sender side of a [`Scheduler`].
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Schedule { delay, .. } => write!(f, "Schedule({delay:?})"),
            Command::Execute(_) => f.write_str("Execute"),
        }
    }
}

impl SchedulerHandle {
    /// Run `job` once `delay` has elapsed.
    pub fn schedule<F>(&self, delay: Duration, job: F) -> ScheduleResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.send(Command::Schedule { delay, job: Box::new(job) })
    }

    /// Run `job` on the next loop iteration.
    pub fn execute<F>(&self, job: F) -> ScheduleResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.send(Command::Execute(Box::new(job)))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn send(&self, cmd: Command) -> ScheduleResult<()> {
        self.tx.send(cmd).map_err(|_| ScheduleError::SchedulerStopped)
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// The callback loop.  Spawn [`run`][Self::run] on the pool.
pub struct Scheduler {
    rx:       mpsc::UnboundedReceiver<Command>,
    pending:  PendingTasks,
    oneshots: VecDeque<Job>,
    control:  Arc<Control>,
}

impl Scheduler {
    pub fn new(control: Arc<Control>) -> (Self, SchedulerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            rx,
            pending: PendingTasks::new(),
            oneshots: VecDeque::new(),
            control,
        };
        (scheduler, SchedulerHandle { tx })
    }

    /// Run until the agent exits, or until every handle is dropped and no
    /// delayed task remains.  Pending tasks are dropped on exit.
    pub async fn run(mut self) {
        let mut senders_gone = false;

        loop {
            if self.control.is_exiting() {
                break;
            }

            while let Ok(cmd) = self.rx.try_recv() {
                self.accept(cmd);
            }

            for task in self.pending.drain_due(Instant::now()) {
                run_job("scheduled", move || task.run());
            }

            let batch: Vec<Job> = self.oneshots.drain(..).collect();
            for job in batch {
                run_job("oneshot", job);
            }

            if senders_gone && self.pending.is_empty() {
                break;
            }

            let next = self.pending.next_trigger();
            let wake = next.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                biased;
                _ = self.control.exited() => break,
                cmd = self.rx.recv(), if !senders_gone => match cmd {
                    Some(cmd) => self.accept(cmd),
                    None => senders_gone = true,
                },
                _ = sleep_until(wake), if next.is_some() => {}
            }
        }

        debug!(dropped = self.pending.len(), "scheduler stopped");
        self.pending.clear();
    }

    fn accept(&mut self, cmd: Command) {
        trace!(?cmd, "scheduler command");
        match cmd {
            Command::Schedule { delay, job } => self.pending.push(Instant::now() + delay, job),
            Command::Execute(job) => self.oneshots.push_back(job),
        }
    }
}

fn run_job(kind: &str, job: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(job)) {
        error!(kind, panic = panic_message(&*payload), "scheduled job panicked");
    }
}

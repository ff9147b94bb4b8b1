//! `PendingTasks`: delayed jobs keyed by trigger instant.
//!
//! `BTreeMap` keeps triggers ordered, so draining everything due is a
//! prefix split and the next wake-up is the first key.  Jobs sharing a
//! trigger run in insertion order.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

/// A deferred closure.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A job together with the instant it became due.
pub struct ScheduledTask {
    pub trigger: Instant,
    action:      Job,
}

impl ScheduledTask {
    pub fn new(trigger: Instant, action: Job) -> Self {
        Self { trigger, action }
    }

    pub fn run(self) {
        (self.action)()
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask").field("trigger", &self.trigger).finish_non_exhaustive()
    }
}

/// Delayed jobs waiting for their trigger.
#[derive(Default)]
pub struct PendingTasks {
    inner: BTreeMap<Instant, Vec<Job>>,
    /// Cached total job count for O(1) `len()`.
    total: usize,
}

impl PendingTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trigger: Instant, job: Job) {
        self.inner.entry(trigger).or_default().push(job);
        self.total += 1;
    }

    /// Remove every task with `trigger <= now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<ScheduledTask> {
        let due = match now.checked_add(Duration::from_nanos(1)) {
            Some(bound) => {
                let future = self.inner.split_off(&bound);
                std::mem::replace(&mut self.inner, future)
            }
            None => std::mem::take(&mut self.inner),
        };

        let mut out = Vec::new();
        for (trigger, jobs) in due {
            self.total -= jobs.len();
            out.extend(jobs.into_iter().map(|job| ScheduledTask::new(trigger, job)));
        }
        out
    }

    /// Earliest trigger, or `None` when empty.
    pub fn next_trigger(&self) -> Option<Instant> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Drop every pending job.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}

impl fmt::Debug for PendingTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTasks")
            .field("len", &self.total)
            .field("next_trigger", &self.next_trigger())
            .finish()
    }
}

//! Text-driven event processors.
//!
//! The host forwards every event line (chat, server messages) to
//! [`EventProcessors::notify`].  Each registered predicate that matches
//! queues its action on the scheduler's one-shot queue, so handlers never
//! run on the host's thread.

use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::SchedulerHandle;

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;
type Action = Arc<dyn Fn(&str) + Send + Sync>;

/// Registry of `(predicate, action)` pairs.
pub struct EventProcessors {
    entries:   RwLock<Vec<(Predicate, Action)>>,
    scheduler: SchedulerHandle,
}

impl EventProcessors {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        Self { entries: RwLock::new(Vec::new()), scheduler }
    }

    pub fn register<P, A>(&self, predicate: P, action: A)
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
        A: Fn(&str) + Send + Sync + 'static,
    {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((Box::new(predicate), Arc::new(action)));
    }

    /// Run `action` for every line containing `needle`.
    pub fn on_contains<A>(&self, needle: impl Into<String>, action: A)
    where
        A: Fn(&str) + Send + Sync + 'static,
    {
        let needle = needle.into();
        self.register(move |line| line.contains(needle.as_str()), action);
    }

    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |e| e.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch `line` to every matching processor.  Returns the number of
    /// actions queued.
    pub fn notify(&self, line: &str) -> usize {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut queued = 0;
        for (predicate, action) in entries.iter() {
            if !predicate(line) {
                continue;
            }
            let action = Arc::clone(action);
            let line = line.to_owned();
            match self.scheduler.execute(move || action(&line)) {
                Ok(()) => queued += 1,
                Err(err) => {
                    warn!(%err, "event processor dropped");
                    break;
                }
            }
        }
        queued
    }
}
